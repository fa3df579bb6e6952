//! Engine errors.
//!
//! Two families only (both local, synchronous and non-retryable):
//!
//! - construction errors, raised while parameterizing a descriptor;
//! - usage errors, raised when an operation is invoked on a descriptor that
//!   has never been parameterized.
//!
//! Subtype queries against parameterized comparison descriptors are not
//! errors; they return `false`.

use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeError {
    /// A descriptor facade was parameterized a second time.
    AlreadyParameterized { kind: &'static str },
    /// A composite descriptor was constructed from zero members.
    EmptyParameterization { kind: &'static str },
    /// The open-ended marker appeared anywhere but last in a tuple or
    /// record item list.
    MisplacedEtc { kind: &'static str },
    /// A `Satisfies` predicate whose registered signature does not conform
    /// to the `Callable[any, bool]` contract.
    PredicateContract,
    /// `membership`, `is_subtype_of` or `type_id` was invoked on a facade
    /// that was never parameterized.
    Unparameterized { kind: &'static str },
}

impl TypeError {
    /// True for the construction family of errors.
    pub fn is_construction(&self) -> bool {
        !self.is_usage()
    }

    /// True for the usage family of errors.
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::Unparameterized { .. })
    }
}

impl fmt::Display for TypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyParameterized { kind } => {
                write!(f, "cannot re-parameterize an existing {kind}")
            }
            Self::EmptyParameterization { kind } => {
                write!(f, "cannot create a {kind} of no types")
            }
            Self::MisplacedEtc { kind } => {
                write!(f, "an open-ended marker must be the last item of a {kind}")
            }
            Self::PredicateContract => {
                write!(
                    f,
                    "predicate does not satisfy the Callable[any, bool] contract"
                )
            }
            Self::Unparameterized { kind } => {
                write!(f, "cannot use an unparameterized {kind}")
            }
        }
    }
}

impl std::error::Error for TypeError {}
