//! Parse and load keymap files.

use std::{ffi::OsStr, fs, path::Path};

use tracing::debug;

use crate::{Error, Keymap, error::excerpt_at};

/// Parse a keymap from RON text and validate it.
///
/// `path` is only used to annotate errors.
pub fn load_from_str(source: &str, path: Option<&Path>) -> Result<Keymap, Error> {
    let km: Keymap = ron::from_str(source).map_err(|e| {
        let line = e.span.start.line;
        let col = e.span.start.col;
        Error::Parse {
            path: path.map(Path::to_path_buf),
            line,
            col,
            message: e.code.to_string(),
            excerpt: excerpt_at(source, line, col),
        }
    })?;
    km.validate().map_err(|e| match path {
        Some(p) => e.with_path(p),
        None => e,
    })?;
    debug!(commands = km.commands.len(), "keymap_loaded");
    Ok(km)
}

impl Keymap {
    /// Parse and validate a keymap from RON text.
    pub fn from_ron(source: &str) -> Result<Self, Error> {
        load_from_str(source, None)
    }
}

/// Load a validated `Keymap` from a `.ron` file at `path`.
pub fn load_from_path(path: &Path) -> Result<Keymap, Error> {
    if path.extension() != Some(OsStr::new("ron")) {
        return Err(Error::Read {
            path: Some(path.to_path_buf()),
            message: "Unsupported keymap format (expected a .ron file)".to_string(),
        });
    }
    let source = fs::read_to_string(path).map_err(|e| Error::Read {
        path: Some(path.to_path_buf()),
        message: e.to_string(),
    })?;
    load_from_str(&source, Some(path))
}

#[cfg(test)]
mod tests {
    use std::{env, process};

    use till_keycode::Key;

    use super::*;
    use crate::CommandId;

    #[test]
    fn parses_minimal_keymap() {
        let ron = r#"(
            commands: [
                (command: help, keys: ["f1"], label: "Aide", text_entry: true),
                (command: payment, keys: ["f12"], label: "Payer", description: "Encaisser"),
                (command: increase_quantity, keys: ["plus", "="], label: "Quantité +"),
            ],
        )"#;
        let km = load_from_str(ron, None).unwrap();
        assert!(km.pass_modified);
        assert_eq!(km.commands.len(), 3);
        assert!(km.get(CommandId::Help).unwrap().text_entry);
        assert_eq!(km.get(CommandId::Payment).unwrap().description, "Encaisser");
        assert_eq!(
            km.get(CommandId::IncreaseQuantity).unwrap().keys,
            vec![Key::Char('+'), Key::Char('=')]
        );
    }

    #[test]
    fn unknown_key_spec_is_a_parse_error() {
        let ron = r#"(commands: [(command: help, keys: ["hyper"], label: "Aide")])"#;
        match load_from_str(ron, None) {
            Err(Error::Parse { message, line, .. }) => {
                assert!(message.contains("hyper"), "{message}");
                assert_eq!(line, 1);
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn unknown_field_is_rejected() {
        let ron = r#"(commands: [(command: help, keys: ["f1"], label: "Aide", colour: "red")])"#;
        assert!(matches!(load_from_str(ron, None), Err(Error::Parse { .. })));
    }

    #[test]
    fn duplicate_binding_fails_validation() {
        let ron = r#"(commands: [
            (command: help, keys: ["f1"], label: "Aide"),
            (command: payment, keys: ["F1"], label: "Payer"),
        ])"#;
        let err = load_from_str(ron, Some(Path::new("till.ron"))).unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
        assert_eq!(err.path(), Some(Path::new("till.ron")));
    }

    #[test]
    fn non_ron_extension_is_rejected() {
        let err = load_from_path(Path::new("/nonexistent/keymap.toml")).unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
    }

    #[test]
    fn missing_file_is_read_error() {
        let err = load_from_path(Path::new("/nonexistent/keymap.ron")).unwrap_err();
        assert!(matches!(err, Error::Read { path: Some(_), .. }));
    }

    #[test]
    fn from_ron_validates() {
        let km = Keymap::from_ron(r#"(pass_modified: false, commands: [])"#).unwrap();
        assert!(!km.pass_modified);
        assert!(km.commands.is_empty());
        let dup = r#"(commands: [
            (command: help, keys: ["f1"], label: "Aide"),
            (command: help, keys: ["f2"], label: "Aide"),
        ])"#;
        assert!(matches!(Keymap::from_ron(dup), Err(Error::Validation { .. })));
    }

    #[test]
    fn loads_keymap_file() {
        let dir = env::temp_dir().join(format!("till-keymap-{}", process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("keymap.ron");
        fs::write(
            &path,
            r#"(commands: [(command: payment, keys: ["f10"], label: "Payer")])"#,
        )
        .unwrap();
        let km = load_from_path(&path).unwrap();
        assert_eq!(km.binding(Key::F10).unwrap().command, CommandId::Payment);
        fs::remove_dir_all(&dir).unwrap();
    }
}
