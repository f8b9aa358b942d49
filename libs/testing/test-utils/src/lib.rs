//! Test infrastructure shared by the workspace's integration tests.
//!
//! `TestDatabase` (feature "postgres") runs a disposable PostgreSQL
//! container with the workspace migrations applied. `TestDataBuilder`
//! derives deterministic fixture values from the test's name, so reruns
//! are reproducible and tests sharing a database never collide on unique
//! columns.

#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "postgres")]
pub use postgres::TestDatabase;

/// Deterministic fixture values, seeded per test.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed from the test's name; the same test always gets the same
    /// values.
    pub fn from_test_name(name: &str) -> Self {
        use std::hash::{DefaultHasher, Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Email unique to this test, tagged for readability in failures.
    pub fn email(&self, tag: &str) -> String {
        format!("{}-{}@example.com", tag, self.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_means_same_values() {
        assert_eq!(
            TestDataBuilder::new(7).email("alice"),
            TestDataBuilder::new(7).email("alice")
        );
    }

    #[test]
    fn test_same_test_name_means_same_seed() {
        assert_eq!(
            TestDataBuilder::from_test_name("a_test").email("x"),
            TestDataBuilder::from_test_name("a_test").email("x")
        );
    }

    #[test]
    fn test_different_tests_do_not_collide() {
        assert_ne!(
            TestDataBuilder::from_test_name("first").email("x"),
            TestDataBuilder::from_test_name("second").email("x")
        );
    }
}
