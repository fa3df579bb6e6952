//! Function-boundary contract enforcement.
//!
//! A [`Contract`] binds parameter names and an optional return position to
//! type descriptors. An [`Enforcer`] checks named arguments before a call
//! and the result after it, using the engine's membership relation only.
//! Parameters a contract does not name are never checked.
//!
//! Enforcement is explicit configuration: [`VerifyConfig`] is passed at
//! enforcer construction, and a disabled enforcer skips every check. There
//! is no process-wide toggle.

use indexmap::IndexMap;
use std::fmt;
use tracing::{debug, trace};
use veritype_solver::{Inspect, TypeFormatter, TypeId, TypeInterner, is_member};

/// Enforcer configuration.
#[derive(Copy, Clone, Debug)]
pub struct VerifyConfig {
    /// When false, every check passes without evaluating membership.
    pub enabled: bool,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Type constraints for one function boundary: parameter name to descriptor,
/// plus an optional return descriptor.
#[derive(Clone, Debug, Default)]
pub struct Contract {
    params: IndexMap<String, TypeId>,
    ret: Option<TypeId>,
}

impl Contract {
    pub fn new() -> Self {
        Self::default()
    }

    /// Constrain the named parameter. A repeated name replaces the earlier
    /// descriptor.
    pub fn param(mut self, name: &str, ty: TypeId) -> Self {
        self.params.insert(name.to_string(), ty);
        self
    }

    /// Constrain the return value.
    pub fn returns(mut self, ty: TypeId) -> Self {
        self.ret = Some(ty);
        self
    }

    pub fn param_type(&self, name: &str) -> Option<TypeId> {
        self.params.get(name).copied()
    }

    pub fn return_type(&self) -> Option<TypeId> {
        self.ret
    }
}

/// A failed contract check. Expected and actual types are carried
/// pre-formatted so the violation outlives the interner borrow.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContractViolation {
    Parameter {
        name: String,
        expected: String,
        actual: String,
    },
    Return {
        expected: String,
        actual: String,
    },
}

impl fmt::Display for ContractViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parameter {
                name,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "incorrect type for {name}: expected {expected}, got {actual}"
                )
            }
            Self::Return { expected, actual } => {
                write!(f, "incorrect return type: expected {expected}, got {actual}")
            }
        }
    }
}

impl std::error::Error for ContractViolation {}

/// Checks values against a [`Contract`] at a call boundary.
#[derive(Copy, Clone, Debug, Default)]
pub struct Enforcer {
    config: VerifyConfig,
}

impl Enforcer {
    pub fn new(config: VerifyConfig) -> Self {
        Self { config }
    }

    /// Check every named argument the contract constrains.
    ///
    /// Arguments whose name the contract does not mention pass unexamined.
    pub fn check_args(
        &self,
        db: &TypeInterner,
        contract: &Contract,
        args: &[(&str, &dyn Inspect)],
    ) -> Result<(), ContractViolation> {
        if !self.config.enabled {
            trace!("enforcement disabled, skipping argument checks");
            return Ok(());
        }
        for &(name, value) in args {
            let Some(expected) = contract.param_type(name) else {
                continue;
            };
            if !is_member(db, value, expected) {
                let violation = self.parameter_violation(db, name, expected, value);
                debug!(%violation, "argument check failed");
                return Err(violation);
            }
            trace!(name, "argument check passed");
        }
        Ok(())
    }

    /// Check the result against the contract's return descriptor, if any.
    pub fn check_return(
        &self,
        db: &TypeInterner,
        contract: &Contract,
        value: &dyn Inspect,
    ) -> Result<(), ContractViolation> {
        if !self.config.enabled {
            trace!("enforcement disabled, skipping return check");
            return Ok(());
        }
        let Some(expected) = contract.return_type() else {
            return Ok(());
        };
        if !is_member(db, value, expected) {
            let fmt = TypeFormatter::new(db);
            let violation = ContractViolation::Return {
                expected: fmt.format(expected),
                actual: fmt.format(value.type_of()),
            };
            debug!(%violation, "return check failed");
            return Err(violation);
        }
        trace!("return check passed");
        Ok(())
    }

    /// Check the arguments, invoke `f`, check the result, and yield it.
    pub fn call<T: Inspect>(
        &self,
        db: &TypeInterner,
        contract: &Contract,
        args: &[(&str, &dyn Inspect)],
        f: impl FnOnce() -> T,
    ) -> Result<T, ContractViolation> {
        self.check_args(db, contract, args)?;
        let result = f();
        self.check_return(db, contract, &result)?;
        Ok(result)
    }

    fn parameter_violation(
        &self,
        db: &TypeInterner,
        name: &str,
        expected: TypeId,
        value: &dyn Inspect,
    ) -> ContractViolation {
        let fmt = TypeFormatter::new(db);
        ContractViolation::Parameter {
            name: name.to_string(),
            expected: fmt.format(expected),
            actual: fmt.format(value.type_of()),
        }
    }
}

#[cfg(test)]
#[path = "../tests/enforcer_tests.rs"]
mod enforcer_tests;
