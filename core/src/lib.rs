//! # POCKET CORE LIBRARY
//!
//! **TYPED DEPENDENCY POCKETS FOR CONSTRUCTOR-FREE INJECTION**
//!
//! **ARCHITECTURE**: One in-memory registry of named slots, each with an optional
//! declared type, checked by trait-based validators
//! **GUARANTEE**: A slot only ever holds a value that satisfies its declared type
//! **CONCURRENCY**: None. A pocket belongs to one owner; wrap it in a lock to share it

pub mod api;
pub mod dependencies;
pub mod errors;
pub mod types;

// **VALIDATION MODULE REGISTRATION**
pub mod validation;

#[cfg(test)]
mod tests {
    use crate::api::*;
    use serde_json::json;

    #[derive(Debug)]
    struct Database {
        dsn: String,
    }
    crate::impl_instance!(Database: "Connection");

    // **INTEGRATION TESTS**
    #[test]
    fn test_define_set_get_pipeline() {
        // **STEP 1**: Declare slots
        let mut pocket = Pocket::new();
        pocket
            .define_many([("db", "Connection"), ("retries", "integer")])
            .unwrap()
            .define_many(["logger"])
            .unwrap();

        // **STEP 2**: Fill them
        pocket
            .set(
                "db",
                Value::object(Database {
                    dsn: "sqlite::memory:".to_string(),
                }),
            )
            .unwrap()
            .set("retries", 3)
            .unwrap();

        // **STEP 3**: Read back
        let db = pocket.get_object::<Database>("db").unwrap().unwrap();
        assert_eq!(db.dsn, "sqlite::memory:");
        assert_eq!(pocket.get("retries").unwrap(), Value::Int(3));
        assert_eq!(pocket.get("logger").unwrap(), Value::Null);
        assert!(!pocket.has_value("logger"));
    }

    #[test]
    fn test_error_propagation() {
        fn configure(pocket: &mut Pocket) -> PocketResult<()> {
            pocket.define("retries", "integer")?;
            pocket.set("retries", json!("three"))?;
            Ok(())
        }

        let mut pocket = Pocket::new();
        match configure(&mut pocket) {
            Err(PocketError::TypeMismatch { name, given, .. }) => {
                assert_eq!(name, "retries");
                assert_eq!(given, "string");
            }
            other => panic!("Expected TypeMismatch, got {:?}", other),
        }
        assert!(pocket.has("retries"));
    }
}
