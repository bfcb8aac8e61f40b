use pocket::api::*;
use pocket::impl_instance;
use pocket::validation::error_codes;
use serde_json::json;
use std::sync::{Arc, Mutex};

#[derive(Debug)]
struct FileLogger {
    path: String,
}
impl_instance!(FileLogger: "Logger");

#[derive(Debug)]
struct NullLogger;
impl_instance!(NullLogger: "Logger");

#[derive(Debug)]
struct SmtpMailer;
impl_instance!(SmtpMailer: "Mailer");

/// Base owner: declares its slots once, never takes them as constructor args.
struct Manager {
    pocket: Pocket,
}

impl Manager {
    fn new() -> PocketResult<Self> {
        let mut pocket = Pocket::new();
        pocket.define_many([("logger", "Logger"), ("name", "string")])?;
        Ok(Self { pocket })
    }

    fn describe(&self) -> PocketResult<String> {
        let name = self.dependency("name")?;
        Ok(format!("manager {}", name.as_str().unwrap_or("<unnamed>")))
    }
}

impl DependencyHolder for Manager {
    fn pocket(&self) -> &Pocket {
        &self.pocket
    }

    fn pocket_mut(&mut self) -> &mut Pocket {
        &mut self.pocket
    }
}

/// Layered owner: adds a mailer slot on top of Manager's.
struct MailingManager {
    base: Manager,
}

impl MailingManager {
    fn new() -> PocketResult<Self> {
        let mut base = Manager::new()?;
        base.pocket_mut().define("mailer", "Mailer")?;
        Ok(Self { base })
    }
}

impl DependencyHolder for MailingManager {
    fn pocket(&self) -> &Pocket {
        self.base.pocket()
    }

    fn pocket_mut(&mut self) -> &mut Pocket {
        self.base.pocket_mut()
    }
}

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_manager_integration() {
    init_logger();
    let mut manager = Manager::new().unwrap();
    assert_eq!(manager.describe().unwrap(), "manager <unnamed>");

    manager.set_dependency("name", "billing").unwrap();
    manager
        .set_dependency(
            "logger",
            Value::object(FileLogger {
                path: "/var/log/billing.log".to_string(),
            }),
        )
        .unwrap();

    assert_eq!(manager.describe().unwrap(), "manager billing");
    let logger = manager.dependency_as::<FileLogger>("logger").unwrap().unwrap();
    assert_eq!(logger.path, "/var/log/billing.log");

    // any Logger implementation fits the slot
    manager.set_dependency("logger", Value::object(NullLogger)).unwrap();
    assert_eq!(manager.dependency("logger").unwrap().type_name(), "NullLogger");
}

#[test]
fn test_layered_manager_integration() {
    let mut manager = MailingManager::new().unwrap();
    assert!(manager.has_dependency("logger"));
    assert!(manager.has_dependency("mailer"));

    manager.set_dependency("mailer", Value::object(SmtpMailer)).unwrap();
    let err = manager
        .set_dependency("mailer", Value::object(NullLogger))
        .unwrap_err();
    assert_eq!(err.code(), error_codes::TYPE_MISMATCH);
    assert_eq!(err.dependency(), Some("mailer"));
    assert!(err.to_string().contains("NullLogger"));

    let all = manager.pocket().get_all();
    let keys: Vec<&String> = all.keys().collect();
    assert_eq!(keys, vec!["logger", "mailer", "name"]);
    assert_eq!(all["mailer"].type_name(), "SmtpMailer");
}

#[test]
fn test_json_configured_pocket() {
    let context = ValidationContext::from_json(r#"{"strict_names": true}"#).unwrap();
    let mut pocket = Pocket::with_context(context);

    pocket
        .define_json(&json!({"port": "int", "hosts": "list", "debug": "bool"}))
        .unwrap();
    pocket
        .set_json(&json!({"port": 8080, "hosts": ["a", "b"], "debug": false}))
        .unwrap();

    assert_eq!(pocket.get("port").unwrap().as_int(), Some(8080));
    assert_eq!(pocket.get("hosts").unwrap().as_list().map(<[Value]>::len), Some(2));
    assert_eq!(pocket.get_type("debug").unwrap().to_string(), "boolean");

    let err = pocket.define(" padded", "").unwrap_err();
    assert_eq!(err.code(), error_codes::INVALID_NAME);
}

#[test]
fn test_shared_pocket_behind_lock() {
    let shared = Arc::new(Mutex::new(Pocket::new()));
    shared.lock().unwrap().define("counter", "integer").unwrap();

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let shared = Arc::clone(&shared);
            std::thread::spawn(move || {
                shared.lock().unwrap().set("counter", i).unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let value = shared.lock().unwrap().get("counter").unwrap();
    assert!(matches!(value, Value::Int(0..=3)));
}
