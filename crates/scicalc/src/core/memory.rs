//! Single-slot memory register

use tracing::debug;

use crate::core::{MemoryError, MemoryResult};

/// One optional numeric slot: MS, MR, MC, M+ and M−
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryRegister {
    value: Option<f64>,
}

impl MemoryRegister {
    /// Creates an empty register
    #[must_use]
    pub fn new() -> Self {
        Self { value: None }
    }

    /// Returns the stored value, if any
    #[must_use]
    pub fn value(&self) -> Option<f64> {
        self.value
    }

    /// Returns true if nothing is stored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_none()
    }

    /// Stores `current`, replacing any previous value
    pub fn store(&mut self, current: f64) -> MemoryResult<f64> {
        let current = Self::check(current)?;
        self.value = Some(current);
        debug!(value = current, "memory store");
        Ok(current)
    }

    /// Returns the stored value
    pub fn recall(&self) -> MemoryResult<f64> {
        self.value.ok_or(MemoryError::Empty)
    }

    /// Empties the register
    pub fn clear(&mut self) {
        self.value = None;
        debug!("memory clear");
    }

    /// Adds `current` to the stored value; stores it when empty
    pub fn add(&mut self, current: f64) -> MemoryResult<f64> {
        match self.value {
            None => self.store(current),
            Some(stored) => self.update(stored + Self::check(current)?),
        }
    }

    /// Subtracts `current` from the stored value
    pub fn subtract(&mut self, current: f64) -> MemoryResult<f64> {
        let stored = self.recall()?;
        self.update(stored - Self::check(current)?)
    }

    fn update(&mut self, value: f64) -> MemoryResult<f64> {
        let value = Self::check(value)?;
        self.value = Some(value);
        debug!(value, "memory update");
        Ok(value)
    }

    fn check(value: f64) -> MemoryResult<f64> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(MemoryError::InvalidValue(value.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_register_is_empty() {
        let memory = MemoryRegister::new();
        assert!(memory.is_empty());
        assert_eq!(memory.recall(), Err(MemoryError::Empty));
    }

    #[test]
    fn test_store_recall_roundtrip() {
        let mut memory = MemoryRegister::new();
        assert_eq!(memory.store(5.0), Ok(5.0));
        assert_eq!(memory.recall(), Ok(5.0));
    }

    #[test]
    fn test_clear_then_recall_is_empty() {
        let mut memory = MemoryRegister::new();
        memory.store(5.0).unwrap();
        memory.clear();
        assert_eq!(memory.recall(), Err(MemoryError::Empty));
    }

    #[test]
    fn test_store_rejects_non_finite() {
        let mut memory = MemoryRegister::new();
        assert!(matches!(
            memory.store(f64::NAN),
            Err(MemoryError::InvalidValue(_))
        ));
        assert!(matches!(
            memory.store(f64::INFINITY),
            Err(MemoryError::InvalidValue(_))
        ));
        assert!(memory.is_empty());
    }

    #[test]
    fn test_add_on_empty_stores() {
        let mut memory = MemoryRegister::new();
        assert_eq!(memory.add(3.0), Ok(3.0));
        assert_eq!(memory.value(), Some(3.0));
    }

    #[test]
    fn test_add_and_subtract_when_occupied() {
        let mut memory = MemoryRegister::new();
        memory.store(10.0).unwrap();
        assert_eq!(memory.add(5.0), Ok(15.0));
        assert_eq!(memory.subtract(4.0), Ok(11.0));
        assert_eq!(memory.recall(), Ok(11.0));
    }

    #[test]
    fn test_subtract_on_empty_reports_empty_without_mutation() {
        let mut memory = MemoryRegister::new();
        assert_eq!(memory.subtract(1.0), Err(MemoryError::Empty));
        assert!(memory.is_empty());
    }

    #[test]
    fn test_invalid_operand_leaves_value_untouched() {
        let mut memory = MemoryRegister::new();
        memory.store(2.0).unwrap();
        assert!(memory.add(f64::NAN).is_err());
        assert!(memory.subtract(f64::NEG_INFINITY).is_err());
        assert_eq!(memory.value(), Some(2.0));
    }

    #[test]
    fn test_overflowing_sum_is_rejected() {
        let mut memory = MemoryRegister::new();
        memory.store(f64::MAX).unwrap();
        assert!(matches!(
            memory.add(f64::MAX),
            Err(MemoryError::InvalidValue(_))
        ));
        assert_eq!(memory.value(), Some(f64::MAX));
    }
}
