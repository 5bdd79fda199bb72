//! Tests for template module.

use super::*;
use std::env;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

const SAMPLE: [(&str, &str); 7] = [
    ("HOSTNAME", "db.local"),
    ("PORT", "3306"),
    ("PMA_USER", "pma"),
    ("PMA_PASS", "secret"),
    ("PMA_DATABASE", "phpmyadmin"),
    ("UPLOADS_DIR", "/tmp"),
    ("BLOWFISH", "abc123"),
];

fn sample_values() -> Values {
    sample_values_without(None)
}

fn sample_values_without(skip: Option<&str>) -> Values {
    let mut values = Values::explicit_only();
    for (token, value) in SAMPLE {
        if Some(token) != skip {
            values.set(token, value);
        }
    }
    values
}

fn lookup<'a>(document: &'a Value, path: &[&str]) -> &'a Value {
    let mut current = document;
    for key in path {
        current = match key.parse::<usize>() {
            Ok(index) => &current[index],
            Err(_) => &current[*key],
        };
    }
    current
}

// ==================== Token scanning tests ====================

#[test]
fn test_find_tokens_single() {
    let text = "{HOSTNAME}";
    assert_eq!(find_tokens(text), vec![0..10]);
}

#[test]
fn test_find_tokens_embedded() {
    let text = "mysql://{PMA_USER}@{HOSTNAME}:{PORT}/";
    let tokens: Vec<&str> = find_tokens(text).into_iter().map(|r| &text[r]).collect();
    assert_eq!(tokens, vec!["{PMA_USER}", "{HOSTNAME}", "{PORT}"]);
}

#[test]
fn test_find_tokens_ignores_non_tokens() {
    assert!(find_tokens("{lower}").is_empty());
    assert!(find_tokens("{}").is_empty());
    assert!(find_tokens("{1ABC}").is_empty());
    assert!(find_tokens("{OPEN").is_empty());
    assert!(find_tokens("(information_schema|mysql)").is_empty());
}

#[test]
fn test_find_tokens_nested_braces() {
    let text = "{{HOST}}";
    let tokens: Vec<&str> = find_tokens(text).into_iter().map(|r| &text[r]).collect();
    assert_eq!(tokens, vec!["{HOST}"]);
}

#[test]
fn test_is_token_name() {
    assert!(is_token_name("PMA_USER"));
    assert!(is_token_name("_X1"));
    assert!(!is_token_name(""));
    assert!(!is_token_name("1X"));
    assert!(!is_token_name("pma_user"));
    assert!(!is_token_name("PMA-USER"));
}

// ==================== Placeholder listing tests ====================

#[test]
fn test_placeholders_builtin() {
    let template = Template::builtin().unwrap();
    let found = template.placeholders();

    assert_eq!(
        found[0],
        Placeholder {
            token: "BLOWFISH".to_string(),
            path: "blowfish_secret".to_string(),
        }
    );
    assert!(found.contains(&Placeholder {
        token: "HOSTNAME".to_string(),
        path: "Servers[1].host".to_string(),
    }));
    assert!(found.contains(&Placeholder {
        token: "PMA_DATABASE".to_string(),
        path: "Servers[1].pmadb".to_string(),
    }));
    assert!(found.contains(&Placeholder {
        token: "UPLOADS_DIR".to_string(),
        path: "UploadDir".to_string(),
    }));
}

#[test]
fn test_placeholders_in_sequence() {
    let template = Template::parse("hosts:\n  - '{A}'\n  - '{B}'\n").unwrap();
    let paths: Vec<String> = template.placeholders().into_iter().map(|p| p.path).collect();
    assert_eq!(paths, vec!["hosts[0]", "hosts[1]"]);
}

// ==================== Substitution tests ====================

#[test]
fn test_substitute_builtin_sample() {
    let template = Template::builtin().unwrap();
    let document = template.substitute(&sample_values()).unwrap();

    assert_eq!(lookup(&document, &["Servers", "1", "host"]).as_str(), Some("db.local"));
    assert_eq!(lookup(&document, &["Servers", "1", "port"]).as_str(), Some("3306"));
    assert_eq!(lookup(&document, &["Servers", "1", "pmadb"]).as_str(), Some("phpmyadmin"));
    assert_eq!(lookup(&document, &["blowfish_secret"]).as_str(), Some("abc123"));
}

#[test]
fn test_substitute_leaves_no_placeholders() {
    let template = Template::builtin().unwrap();
    let document = template.substitute(&sample_values()).unwrap();

    let rendered = serde_yaml::to_string(&document).unwrap();
    let resolved = Template::parse(&rendered).unwrap();
    assert!(resolved.placeholders().is_empty());
}

#[test]
fn test_substitute_embedded_tokens() {
    let template = Template::parse("dsn: 'mysql://{USER}@{HOST}:3306'\n").unwrap();
    let mut values = Values::explicit_only();
    values.set("USER", "pma");
    values.set("HOST", "db");

    let document = template.substitute(&values).unwrap();
    assert_eq!(document["dsn"].as_str(), Some("mysql://pma@db:3306"));
}

#[test]
fn test_substitute_missing_names_first_key() {
    let template = Template::builtin().unwrap();
    let values = sample_values_without(Some("BLOWFISH"));

    let result = template.substitute(&values);
    match result {
        Err(TemplateError::MissingValue(path)) => assert_eq!(path, "blowfish_secret"),
        other => panic!("expected MissingValue, got {other:?}"),
    }
}

#[test]
fn test_substitute_missing_nested_key() {
    let template = Template::builtin().unwrap();
    let values = sample_values_without(Some("HOSTNAME"));

    let result = template.substitute(&values);
    assert!(result.is_err());
    assert_eq!(result.unwrap_err().to_string(), "missing value for Servers[1].host");
}

#[test]
fn test_substitute_empty_value_counts_as_resolved() {
    let template = Template::parse("UploadDir: '{UPLOADS_DIR}'\n").unwrap();
    let mut values = Values::explicit_only();
    values.set("UPLOADS_DIR", "");

    let document = template.substitute(&values).unwrap();
    assert_eq!(document["UploadDir"].as_str(), Some(""));
}

#[test]
fn test_substitute_does_not_rescan_values() {
    let template = Template::parse("a: '{FIRST}'\n").unwrap();
    let mut values = Values::explicit_only();
    values.set("FIRST", "{SECOND}");

    let document = template.substitute(&values).unwrap();
    assert_eq!(document["a"].as_str(), Some("{SECOND}"));
}

#[test]
fn test_substitute_value_cannot_change_structure() {
    let template = Template::parse("a: '{VALUE}'\nb: keep\n").unwrap();
    let mut values = Values::explicit_only();
    values.set("VALUE", "x'\nb: replaced");

    let document = template.substitute(&values).unwrap();
    assert_eq!(document["a"].as_str(), Some("x'\nb: replaced"));
    assert_eq!(document["b"].as_str(), Some("keep"));
}

#[test]
fn test_substitute_keeps_non_string_scalars() {
    let template = Template::parse("n: 1440\nflag: true\n").unwrap();
    let document = template.substitute(&Values::explicit_only()).unwrap();

    assert_eq!(document["n"].as_u64(), Some(1440));
    assert_eq!(document["flag"].as_bool(), Some(true));
}

#[test]
fn test_parse_invalid_yaml() {
    let result = Template::parse("a: [unclosed");
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("failed to parse template"));
}

// ==================== Values tests ====================

#[test]
fn test_values_assign() {
    let mut values = Values::explicit_only();
    values.assign("PMA_PASS=s3cr=t").unwrap();
    assert_eq!(values.get("PMA_PASS"), Some("s3cr=t".to_string()));
}

#[test]
fn test_values_assign_rejects_missing_equals() {
    let mut values = Values::explicit_only();
    let result = values.assign("HOSTNAME");
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("has no '='"));
}

#[test]
fn test_values_assign_rejects_bad_name() {
    let mut values = Values::explicit_only();
    let result = values.assign("host=db");
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("is not a valid placeholder name"));
}

#[test]
fn test_values_from_env() {
    // Unique name to avoid conflicts with parallel tests
    unsafe {
        env::set_var("PMACONF_TEST_ENV_HOST", "env.local");
    }

    let values = Values::new();
    assert_eq!(values.get("PMACONF_TEST_ENV_HOST"), Some("env.local".to_string()));

    let explicit = Values::explicit_only();
    assert_eq!(explicit.get("PMACONF_TEST_ENV_HOST"), None);

    unsafe {
        env::remove_var("PMACONF_TEST_ENV_HOST");
    }
}

#[test]
fn test_values_explicit_overrides_env() {
    unsafe {
        env::set_var("PMACONF_TEST_OVERRIDE", "from_env");
    }

    let mut values = Values::new();
    values.set("PMACONF_TEST_OVERRIDE", "from_cli");
    assert_eq!(values.get("PMACONF_TEST_OVERRIDE"), Some("from_cli".to_string()));

    unsafe {
        env::remove_var("PMACONF_TEST_OVERRIDE");
    }
}

#[test]
fn test_values_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"HOSTNAME: db.local\nPORT: 3306\nUPLOADS_DIR:\nCOMPRESS: true\n")
        .unwrap();

    let mut values = Values::explicit_only();
    values.extend_from_file(file.path()).unwrap();

    assert_eq!(values.get("HOSTNAME"), Some("db.local".to_string()));
    assert_eq!(values.get("PORT"), Some("3306".to_string()));
    assert_eq!(values.get("UPLOADS_DIR"), Some(String::new()));
    assert_eq!(values.get("COMPRESS"), Some("true".to_string()));
}

#[test]
fn test_values_from_file_rejects_nested() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"HOSTNAME:\n  nested: true\n").unwrap();

    let mut values = Values::explicit_only();
    let result = values.extend_from_file(file.path());
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("value must be a scalar"));
}

#[test]
fn test_load_env_file_explicit() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"PMACONF_TEST_DOTENV=from_file\n").unwrap();

    Values::load_env_file(Some(file.path())).unwrap();
    assert_eq!(Values::new().get("PMACONF_TEST_DOTENV"), Some("from_file".to_string()));

    unsafe {
        env::remove_var("PMACONF_TEST_DOTENV");
    }
}

#[test]
fn test_load_env_file_missing_explicit() {
    let result = Values::load_env_file(Some(Path::new("nonexistent.env")));
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("failed to load env file"));
}

#[test]
fn test_load_optional_env_file_ignores_parent_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(".env"), "PMACONF_TEST_PARENT_DOTENV=leaked\n").unwrap();
    let nested = dir.path().join("nested");
    std::fs::create_dir(&nested).unwrap();

    let loaded = super::values::load_optional_env_file(&nested.join(".env")).unwrap();
    assert!(!loaded);
    assert_eq!(env::var("PMACONF_TEST_PARENT_DOTENV").ok(), None);
}

#[test]
fn test_load_optional_env_file_present() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".env");
    std::fs::write(&path, "PMACONF_TEST_LOCAL_DOTENV=local\n").unwrap();

    assert!(super::values::load_optional_env_file(&path).unwrap());
    assert_eq!(env::var("PMACONF_TEST_LOCAL_DOTENV").ok(), Some("local".to_string()));

    unsafe {
        env::remove_var("PMACONF_TEST_LOCAL_DOTENV");
    }
}

#[test]
fn test_from_sources_assignment_beats_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"HOSTNAME: from-file\nPORT: 3306\n").unwrap();

    let values = Values::from_sources(
        false,
        Some(file.path()),
        &["HOSTNAME=from-cli".to_string()],
    )
    .unwrap();

    assert_eq!(values.get("HOSTNAME"), Some("from-cli".to_string()));
    assert_eq!(values.get("PORT"), Some("3306".to_string()));
}

#[test]
fn test_from_sources_later_assignment_wins() {
    let assignments = ["PORT=3306".to_string(), "PORT=3307".to_string()];
    let values = Values::from_sources(false, None, &assignments).unwrap();
    assert_eq!(values.get("PORT"), Some("3307".to_string()));
}

#[test]
fn test_from_sources_file_beats_env() {
    unsafe {
        env::set_var("PMACONF_TEST_SOURCES_HOST", "from-env");
    }
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"PMACONF_TEST_SOURCES_HOST: from-file\n").unwrap();

    let values = Values::from_sources(true, Some(file.path()), &[]).unwrap();
    assert_eq!(
        values.get("PMACONF_TEST_SOURCES_HOST"),
        Some("from-file".to_string())
    );

    unsafe {
        env::remove_var("PMACONF_TEST_SOURCES_HOST");
    }
}

#[test]
fn test_from_sources_without_env() {
    unsafe {
        env::set_var("PMACONF_TEST_SOURCES_NO_ENV", "from-env");
    }

    let with_env = Values::from_sources(true, None, &[]).unwrap();
    assert_eq!(
        with_env.get("PMACONF_TEST_SOURCES_NO_ENV"),
        Some("from-env".to_string())
    );
    let without_env = Values::from_sources(false, None, &[]).unwrap();
    assert_eq!(without_env.get("PMACONF_TEST_SOURCES_NO_ENV"), None);

    unsafe {
        env::remove_var("PMACONF_TEST_SOURCES_NO_ENV");
    }
}

#[test]
fn test_from_sources_bad_assignment() {
    let result = Values::from_sources(false, None, &["HOSTNAME".to_string()]);
    assert!(matches!(result, Err(TemplateError::InvalidAssignment(_))));
}

#[test]
fn test_template_load_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"Servers:\n  1:\n    host: '{HOSTNAME}'\n").unwrap();

    let template = Template::load(Some(file.path())).unwrap();
    let tokens: Vec<String> = template.placeholders().into_iter().map(|p| p.token).collect();
    assert_eq!(tokens, vec!["HOSTNAME"]);
}

#[test]
fn test_template_load_builtin() {
    let template = Template::load(None).unwrap();
    assert!(template.placeholders().iter().any(|p| p.token == "BLOWFISH"));
}

#[test]
fn test_template_load_missing_file() {
    let result = Template::load(Some(Path::new("/nonexistent/template.yaml")));
    assert!(matches!(result, Err(TemplateError::ReadFile(_))));
}
