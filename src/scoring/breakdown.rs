//! Score breakdowns: a total plus the terms that produced it.
//!
//! Every card score is assembled through a [`ScoreBreakdown`] so debug
//! logs can show exactly why the engine preferred one play over another.
//! Breakdowns live for one decision and are then dropped.

use smallvec::SmallVec;

use crate::core::TargetRef;

/// One labeled step in a score computation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Term {
    pub label: &'static str,
    pub op: Op,
}

/// How a term changed the running total.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Op {
    Add(f32),
    Scale(f32),
}

/// A float total plus enough context to explain it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScoreBreakdown {
    total: f32,
    target: Option<TargetRef>,
    terms: SmallVec<[Term; 8]>,
}

impl ScoreBreakdown {
    /// An empty breakdown with total zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The running total.
    #[must_use]
    pub fn total(&self) -> f32 {
        self.total
    }

    /// The target this score was computed against, if any.
    #[must_use]
    pub fn target(&self) -> Option<TargetRef> {
        self.target
    }

    /// The recorded terms, in application order.
    #[must_use]
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Add `amount` to the total under `label`. Zero contributions are
    /// dropped to keep logs readable.
    pub fn add(&mut self, label: &'static str, amount: f32) {
        if amount == 0.0 {
            return;
        }
        self.total += amount;
        self.terms.push(Term {
            label,
            op: Op::Add(amount),
        });
    }

    /// Multiply the total by `factor` under `label`. A factor of one is
    /// dropped.
    pub fn scale(&mut self, label: &'static str, factor: f32) {
        if factor == 1.0 {
            return;
        }
        self.total *= factor;
        self.terms.push(Term {
            label,
            op: Op::Scale(factor),
        });
    }

    /// Record the target the score refers to.
    pub fn set_target(&mut self, target: TargetRef) {
        self.target = Some(target);
    }
}

impl std::fmt::Display for ScoreBreakdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}", self.total)?;
        if let Some(target) = self.target {
            write!(f, " vs {target}")?;
        }
        if self.terms.is_empty() {
            return Ok(());
        }
        write!(f, " [")?;
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match term.op {
                Op::Add(v) => write!(f, "{} {v:+.1}", term.label)?,
                Op::Scale(v) => write!(f, "{} x{v:.2}", term.label)?,
            }
        }
        write!(f, "]")
    }
}
