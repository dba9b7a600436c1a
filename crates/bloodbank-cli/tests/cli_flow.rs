use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::{tempdir, TempDir};

fn bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_bloodbank"))
}

struct Env {
    dir: TempDir,
}

impl Env {
    fn new() -> Self {
        let dir = tempdir().expect("tempdir");
        fs::create_dir_all(dir.path().join("c")).expect("create config dir");
        fs::create_dir_all(dir.path().join("d")).expect("create data dir");
        Self { dir }
    }

    fn data_path(&self) -> PathBuf {
        self.dir.path().join("d").join("bank.json")
    }

    fn config_home(&self) -> PathBuf {
        self.dir.path().join("c")
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(bin())
            .args(args)
            .env("BLOODBANK_DATA", self.data_path())
            .env_remove("BLOODBANK_CONFIG")
            .env("XDG_CONFIG_HOME", self.config_home())
            .env("XDG_DATA_HOME", self.dir.path().join("d"))
            .env("NO_COLOR", "1")
            .output()
            .expect("run bloodbank")
    }

    fn json(&self, args: &[&str]) -> serde_json::Value {
        let output = self.run(args);
        assert!(
            output.status.success(),
            "command {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        serde_json::from_slice(&output.stdout).expect("valid json on stdout")
    }

    fn on_disk(&self) -> serde_json::Value {
        serde_json::from_str(&fs::read_to_string(self.data_path()).expect("read data file"))
            .expect("data file is json")
    }
}

fn identity_args<'a>(name: &'a str, id: &'a str) -> Vec<&'a str> {
    vec![
        "--name",
        name,
        "--email",
        "someone@example.com",
        "--age",
        "34",
        "--id",
        id,
        "--no-input",
    ]
}

fn donate(env: &Env, name: &str, id: &str, amount: &str, blood_type: &str) -> Output {
    let mut args = vec!["donate"];
    args.extend(identity_args(name, id));
    args.extend(["--amount", amount, "--blood-type", blood_type, "--date", "2025-04-01"]);
    env.run(&args)
}

fn request(env: &Env, name: &str, id: &str, amount: &str, blood_type: &str) -> Output {
    let mut args = vec!["request"];
    args.extend(identity_args(name, id));
    args.extend(["--amount", amount, "--blood-type", blood_type]);
    env.run(&args)
}

#[test]
fn test_init_creates_default_stock() {
    let env = Env::new();
    let output = env.run(&["init"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Initialized"));

    let doc = env.on_disk();
    for code in ["A+", "A-", "AB+", "AB-", "B+", "B-", "O+", "O-"] {
        assert_eq!(doc["inventory"][code], 2000);
    }

    let listing = env.json(&["inventory", "--json"]);
    assert_eq!(listing.as_array().map(|a| a.len()), Some(8));
    assert_eq!(listing[0]["blood_type"], "A+");
    assert_eq!(listing[0]["status"], "good");
}

#[test]
fn test_oversized_request_is_rejected_then_exact_request_drains_stock() {
    let env = Env::new();

    let output = request(&env, "Pat", "9", "2500", "O-");
    assert_eq!(output.status.code(), Some(5));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Insufficient stock"));
    let doc = env.on_disk();
    assert_eq!(doc["inventory"]["O-"], 2000);
    assert_eq!(doc["patients"], serde_json::json!([]));

    let output = request(&env, "Pat", "9", "2000", "O-");
    assert!(output.status.success());
    let doc = env.on_disk();
    assert_eq!(doc["inventory"]["O-"], 0);
    assert_eq!(doc["patients"][0]["required_amount"], 2000);

    let alerts = env.json(&["alerts", "--json"]);
    assert_eq!(alerts.as_array().map(|a| a.len()), Some(1));
    assert_eq!(alerts[0]["blood_type"], "O-");
    assert_eq!(alerts[0]["amount"], 0);
}

#[test]
fn test_invalid_input_exits_4_and_changes_nothing() {
    let env = Env::new();
    env.run(&["init"]);
    let before = fs::read_to_string(env.data_path()).unwrap();

    let output = donate(&env, "Ada", "1", "300", "Z+");
    assert_eq!(output.status.code(), Some(4));

    let output = donate(&env, "Ada", "1", "900", "A+");
    assert_eq!(output.status.code(), Some(4));

    let output = env.run(&["donate", "--name", "Ada", "--no-input"]);
    assert_eq!(output.status.code(), Some(4));
    assert!(String::from_utf8_lossy(&output.stderr).contains("--email"));

    let output = env.run(&["compatibility", "ab+"]);
    assert_eq!(output.status.code(), Some(4));

    assert_eq!(fs::read_to_string(env.data_path()).unwrap(), before);
}

#[test]
fn test_ineligible_donor_is_refused_before_other_fields() {
    let env = Env::new();
    let mut args = vec!["donate"];
    args.extend(identity_args("Ada", "1"));
    args.push("--chronic-condition");

    let output = env.run(&args);
    assert_eq!(output.status.code(), Some(4));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not eligible"));
    assert!(!stderr.contains("--amount"));
}

#[test]
fn test_manual_stock_adjustment() {
    let env = Env::new();

    let added = env.json(&["stock", "add", "--blood-type", "O+", "--amount", "150", "--json"]);
    assert_eq!(added["blood_type"], "O+");
    assert_eq!(added["action"], "add");
    assert_eq!(added["total"], 2150);

    let removed = env.json(&["stock", "remove", "--blood-type", "O+", "--amount", "50", "--json"]);
    assert_eq!(removed["total"], 2100);

    let output = env.run(&["stock", "remove", "--blood-type", "O+", "--amount", "5000"]);
    assert_eq!(output.status.code(), Some(5));

    let output = env.run(&["stock", "add", "--blood-type", "XX", "--amount", "100"]);
    assert_eq!(output.status.code(), Some(4));

    let output = env.run(&["stock", "add", "--blood-type", "O+", "--amount", "-5"]);
    assert_eq!(output.status.code(), Some(4));

    let doc = env.on_disk();
    assert_eq!(doc["inventory"]["O+"], 2100);
    assert_eq!(doc["donors"], serde_json::json!([]));
    assert_eq!(doc["patients"], serde_json::json!([]));
    let logs: Vec<String> = serde_json::from_value(doc["logs"].clone()).unwrap();
    assert_eq!(logs.len(), 2);
    assert!(logs[0].ends_with("Added 150ml to O+ (new: 2150 ml)"));
    assert!(logs[1].ends_with("Removed 50ml from O+ (remaining: 2100 ml)"));
}

#[test]
fn test_ineligible_donor_is_refused() {
    let env = Env::new();
    let mut args = vec!["donate"];
    args.extend(identity_args("Ada", "1"));
    args.extend(["--amount", "300", "--blood-type", "A+", "--chronic-condition"]);

    let output = env.run(&args);
    assert_eq!(output.status.code(), Some(4));
    assert_eq!(env.on_disk()["donors"], serde_json::json!([]));
}

#[test]
fn test_donation_search_and_history() {
    let env = Env::new();
    assert!(donate(&env, "Ada Lovelace", "17", "450", "AB-").status.success());
    assert!(donate(&env, "Grace Hopper", "18", "200", "O+").status.success());

    let doc = env.on_disk();
    assert_eq!(doc["inventory"]["AB-"], 2450);
    assert_eq!(doc["donors"][0]["donation_date"], "2025-04-01");

    let by_name = env.json(&["search", "donors", "lovelace", "--json"]);
    assert_eq!(by_name.as_array().map(|a| a.len()), Some(1));
    assert_eq!(by_name[0]["name"], "Ada Lovelace");

    let by_id = env.json(&["search", "donors", "18", "--json"]);
    assert_eq!(by_id[0]["name"], "Grace Hopper");

    let by_type = env.json(&["search", "donors", "ab-", "--json"]);
    assert_eq!(by_type[0]["id"], 17);

    let none = env.json(&["search", "patients", "ada", "--json"]);
    assert_eq!(none, serde_json::json!([]));

    let history = env.json(&["history", "donors", "--json"]);
    assert_eq!(history.as_array().map(|a| a.len()), Some(2));

    let logs = env.json(&["logs", "--limit", "0", "--json"]);
    let messages: Vec<&str> = logs
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|entry| entry["message"].as_str())
        .collect();
    assert!(messages.contains(&"Added 450ml to AB- (new: 2450 ml)"));
    assert!(messages.iter().any(|m| m.starts_with("Search performed for 'lovelace' in donors")));
    assert!(messages.iter().any(|m| m.contains("history")));
}

#[test]
fn test_report_and_staff() {
    let env = Env::new();
    assert!(donate(&env, "Ada", "1", "300", "B+").status.success());
    assert!(request(&env, "Bob", "2", "100", "B+").status.success());

    let mut args = vec!["staff"];
    args.extend(identity_args("Nurse Joy", "77"));
    assert!(env.run(&args).status.success());

    let report = env.json(&["report", "--json"]);
    assert_eq!(report["donations"]["count"], 1);
    assert_eq!(report["donations"]["amount"], 300);
    assert_eq!(report["requests"]["amount"], 100);
    assert_eq!(report["activity"]["B+"]["donated"], 300);
    assert_eq!(report["activity"]["B+"]["requested"], 100);

    let logs = env.on_disk()["logs"].clone();
    let logs: Vec<String> = serde_json::from_value(logs).unwrap();
    assert!(logs.iter().any(|l| l.contains("Nurse Joy") && l.contains("77")));
    assert!(logs.iter().all(|l| !l.to_lowercase().contains("salary")));
}

#[test]
fn test_compatibility_lookup() {
    let env = Env::new();
    let value = env.json(&["compatibility", "AB-", "--json"]);
    assert_eq!(value["compatible_donors"], serde_json::json!(["O-", "A-", "B-", "AB-"]));
    assert!(!env.data_path().exists());
}

#[test]
fn test_corrupt_data_file_is_backed_up() {
    let env = Env::new();
    fs::write(env.data_path(), "{ not json").unwrap();

    let output = env.run(&["inventory"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("[WARN]"));

    let backups: Vec<PathBuf> = fs::read_dir(env.data_path().parent().unwrap())
        .unwrap()
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.starts_with("bank.json.corrupt-"))
                .unwrap_or(false)
        })
        .collect();
    assert_eq!(backups.len(), 1);
    assert_eq!(fs::read_to_string(&backups[0]).unwrap(), "{ not json");
    assert_eq!(env.on_disk()["inventory"]["A+"], 2000);
}

#[test]
fn test_fail_policy_from_config() {
    let env = Env::new();
    write_config(&env.config_home(), "[storage]\non_corrupt = \"fail\"\n");
    fs::write(env.data_path(), "{ not json").unwrap();

    let output = env.run(&["inventory"]);
    assert_eq!(output.status.code(), Some(6));
    assert_eq!(fs::read_to_string(env.data_path()).unwrap(), "{ not json");
}

#[test]
fn test_wrong_shape_document_is_left_alone() {
    let env = Env::new();
    let contents = r#"{"inventory": {"O-": 150}, "donors": [{"name": "Ada", "id": "12"}]}"#;
    fs::write(env.data_path(), contents).unwrap();

    let output = env.run(&["inventory"]);
    assert_eq!(output.status.code(), Some(6));
    assert_eq!(fs::read_to_string(env.data_path()).unwrap(), contents);
    let siblings = fs::read_dir(env.data_path().parent().unwrap()).unwrap().count();
    assert_eq!(siblings, 1);
}

#[test]
fn test_threshold_from_config() {
    let env = Env::new();
    write_config(
        &env.config_home(),
        "[inventory]\nstarting_volume_ml = 400\ncritical_threshold_ml = 450\n",
    );

    let alerts = env.json(&["alerts", "--json"]);
    assert_eq!(alerts.as_array().map(|a| a.len()), Some(8));
    assert_eq!(alerts[0]["threshold"], 450);

    let none = env.json(&["alerts", "--threshold", "400", "--json"]);
    assert_eq!(none, serde_json::json!([]));
}

fn write_config(config_home: &Path, contents: &str) {
    let dir = config_home.join("bloodbank");
    fs::create_dir_all(&dir).expect("create config dir");
    fs::write(dir.join("config.toml"), contents).expect("write config");
}
