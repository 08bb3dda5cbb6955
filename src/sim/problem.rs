//! Arithmetic problem generation

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Arithmetic operation shown in a problem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Add,
        Operation::Subtract,
        Operation::Multiply,
        Operation::Divide,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            Operation::Add => "+",
            Operation::Subtract => "-",
            Operation::Multiply => "×",
            Operation::Divide => "÷",
        }
    }
}

/// A problem to solve: the expression shown and its integer answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    pub left: i32,
    pub op: Operation,
    pub right: i32,
    pub answer: i32,
}

impl Problem {
    /// Build a problem, computing the answer from its operands.
    ///
    /// Division is only ever built as `b * answer ÷ b`, so it is exact.
    pub fn new(left: i32, op: Operation, right: i32) -> Self {
        let answer = match op {
            Operation::Add => left + right,
            Operation::Subtract => left - right,
            Operation::Multiply => left * right,
            Operation::Divide => left / right,
        };
        Self {
            left,
            op,
            right,
            answer,
        }
    }

    /// Expression text, e.g. `"48 ÷ 4"`
    pub fn display(&self) -> String {
        format!("{} {} {}", self.left, self.op.symbol(), self.right)
    }

    /// Prompt text shown in the HUD, e.g. `"48 ÷ 4 = ?"`
    pub fn prompt(&self) -> String {
        format!("{} = ?", self.display())
    }
}

/// How problems are chosen each round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProblemPolicy {
    /// Division facts only: `b * answer ÷ b` with b, answer in [2, 12]
    #[default]
    DivisionFacts,
    /// Uniform mix of +, -, ×, ÷ with small operands and non-negative results
    MixedOperations,
}

impl ProblemPolicy {
    pub fn generate(&self, rng: &mut impl Rng) -> Problem {
        match self {
            ProblemPolicy::DivisionFacts => {
                let divisor = rng.random_range(2..=12);
                let answer = rng.random_range(2..=12);
                Problem::new(divisor * answer, Operation::Divide, divisor)
            }
            ProblemPolicy::MixedOperations => {
                let op = Operation::ALL[rng.random_range(0..Operation::ALL.len())];
                match op {
                    Operation::Add => {
                        let a = rng.random_range(1..=20);
                        let b = rng.random_range(1..=20);
                        Problem::new(a, op, b)
                    }
                    Operation::Subtract => {
                        let a = rng.random_range(1..=20);
                        let b = rng.random_range(1..=a);
                        Problem::new(a, op, b)
                    }
                    Operation::Multiply => {
                        let a = rng.random_range(1..=12);
                        let b = rng.random_range(1..=12);
                        Problem::new(a, op, b)
                    }
                    Operation::Divide => {
                        let divisor = rng.random_range(1..=12);
                        let answer = rng.random_range(1..=12);
                        Problem::new(divisor * answer, op, divisor)
                    }
                }
            }
        }
    }
}
