//! Fixed-capacity motor table.

use heapless::{String, Vec};

use crate::error::{RegistryError, Result};

/// Stable index of a registered motor.
///
/// Indices are dense and assigned in registration order, starting at 0. The
/// same index addresses the motor's slot in [`Block::steps`](crate::Block::steps)
/// and its bit in the unstep set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotorId(usize);

impl MotorId {
    /// Slot index of this motor.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl From<MotorId> for usize {
    fn from(id: MotorId) -> Self {
        id.index()
    }
}

/// Registry of up to `N` motors.
///
/// Filled during setup, before the engine starts; never resized afterwards.
#[derive(Debug)]
pub struct MotorRegistry<M, const N: usize> {
    motors: Vec<M, N>,
    names: Vec<Option<String<32>>, N>,
}

impl<M, const N: usize> Default for MotorRegistry<M, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M, const N: usize> MotorRegistry<M, N> {
    /// Create an empty registry.
    pub const fn new() -> Self {
        Self {
            motors: Vec::new(),
            names: Vec::new(),
        }
    }

    /// Append a motor and return its index.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::CapacityExceeded` once all `N` slots are taken.
    pub fn register(&mut self, motor: M) -> Result<MotorId> {
        self.insert(None, motor)
    }

    /// Append a motor under a unique name and return its index.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry is full, the name is longer than 32
    /// bytes, or the name is taken.
    pub fn register_named(&mut self, name: &str, motor: M) -> Result<MotorId> {
        let name: String<32> = String::try_from(name).map_err(|_| RegistryError::NameTooLong)?;
        if self.position(name.as_str()).is_some() {
            return Err(RegistryError::DuplicateName(name).into());
        }
        self.insert(Some(name), motor)
    }

    fn insert(&mut self, name: Option<String<32>>, motor: M) -> Result<MotorId> {
        let index = self.motors.len();
        if self.motors.push(motor).is_err() {
            return Err(RegistryError::CapacityExceeded { capacity: N }.into());
        }
        // names has the same capacity as motors
        let _ = self.names.push(name);
        Ok(MotorId(index))
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.names
            .iter()
            .position(|n| n.as_ref().map(|s| s.as_str()) == Some(name))
    }

    /// Look up a motor index by name.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::MotorNotFound` if no motor has that name.
    pub fn id_of(&self, name: &str) -> Result<MotorId> {
        self.position(name).map(MotorId).ok_or_else(|| {
            RegistryError::MotorNotFound(String::try_from(name).unwrap_or_default()).into()
        })
    }

    /// Get a registered motor.
    pub fn get(&self, id: MotorId) -> Option<&M> {
        self.motors.get(id.index())
    }

    /// Name a motor was registered under, if any.
    pub fn name(&self, id: MotorId) -> Option<&str> {
        self.names
            .get(id.index())
            .and_then(|n| n.as_ref())
            .map(|s| s.as_str())
    }

    /// Number of registered motors.
    #[inline]
    pub fn len(&self) -> usize {
        self.motors.len()
    }

    /// Whether no motor is registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.motors.is_empty()
    }

    /// Maximum number of motors.
    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Indices of all registered motors, in registration order.
    pub fn ids(&self) -> impl Iterator<Item = MotorId> {
        (0..self.motors.len()).map(MotorId)
    }

    /// Registered motors, indexed by [`MotorId::index`].
    #[inline]
    pub fn as_slice(&self) -> &[M] {
        &self.motors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_dense_indices() {
        let mut registry: MotorRegistry<&str, 4> = MotorRegistry::new();
        let a = registry.register("a").unwrap();
        let b = registry.register("b").unwrap();
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(registry.get(b), Some(&"b"));
        assert_eq!(registry.len(), 2);
        assert!(registry.ids().eq([a, b]));
    }

    #[test]
    fn test_indices_past_u8_range() {
        let mut registry: MotorRegistry<(), 300> = MotorRegistry::new();
        for _ in 0..257 {
            registry.register(()).unwrap();
        }
        let last = registry.ids().last().unwrap();
        assert_eq!(last.index(), 256);
        assert_ne!(last, MotorId(0));
        assert_eq!(registry.get(last), Some(&()));
    }

    #[test]
    fn test_capacity_exhausted() {
        let mut registry: MotorRegistry<u8, 2> = MotorRegistry::new();
        registry.register(0).unwrap();
        registry.register(1).unwrap();
        assert_eq!(
            registry.register(2),
            Err(Error::Registry(RegistryError::CapacityExceeded { capacity: 2 }))
        );
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_named_lookup() {
        let mut registry: MotorRegistry<u8, 4> = MotorRegistry::new();
        registry.register(7).unwrap();
        let alpha = registry.register_named("alpha", 8).unwrap();
        assert_eq!(registry.id_of("alpha").unwrap(), alpha);
        assert_eq!(registry.name(alpha), Some("alpha"));
        assert_eq!(registry.name(MotorId(0)), None);
        assert!(matches!(
            registry.id_of("beta"),
            Err(Error::Registry(RegistryError::MotorNotFound(_)))
        ));
    }

    #[test]
    fn test_duplicate_name() {
        let mut registry: MotorRegistry<u8, 4> = MotorRegistry::new();
        registry.register_named("alpha", 1).unwrap();
        assert!(matches!(
            registry.register_named("alpha", 2),
            Err(Error::Registry(RegistryError::DuplicateName(_)))
        ));
        assert_eq!(registry.len(), 1);
    }
}
