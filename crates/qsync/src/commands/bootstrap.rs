//! Run a widget manifest through bootstrap with the headless renderer.
//!
//! ```toml
//! [[widget]]
//! kind = "multiselect"
//! label = "Pick some"
//! key = "multi"
//! options = ["Streamlit", "QS", "Rocks"]
//! default = ["QS"]
//! autoupdate = true
//!
//! [[widget]]
//! kind = "selectbox"
//! key = "color"
//! options = ["Red", "Green"]
//! enum = { name = "Color", members = ["Red", "Green"] }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use clap::ArgMatches;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use qsync_core::{
    EnumType, HeadlessRenderer, MemoryQueryParams, MemorySessionState, NumberDefault,
    QueryParams, SyncContext, SyncResult, Value, WidgetArgs,
};

use super::helpers::{codec_from_name, load_config_with_warning, parse_assignment};

type HeadlessContext = SyncContext<MemorySessionState, MemoryQueryParams, HeadlessRenderer>;

#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(default)]
    widget: Vec<WidgetSpec>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ManifestKind {
    TextInput,
    TextArea,
    Selectbox,
    Radio,
    Multiselect,
    Checkbox,
    Toggle,
    NumberInput,
}

#[derive(Debug, Clone, Deserialize)]
struct EnumSpec {
    name: String,
    members: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct WidgetSpec {
    kind: ManifestKind,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    key: Option<String>,
    #[serde(default)]
    options: Vec<Value>,
    /// Default selection for selectbox/radio. Absent means the first option.
    #[serde(default)]
    index: Option<usize>,
    #[serde(default)]
    default: Option<Value>,
    /// Start with no value: no selection, empty text, empty number.
    #[serde(default)]
    none_default: bool,
    #[serde(default)]
    autoupdate: bool,
    #[serde(default)]
    codec: Option<String>,
    #[serde(default = "default_discard_missing")]
    discard_missing: bool,
    #[serde(default, rename = "enum")]
    enum_spec: Option<EnumSpec>,
    #[serde(default)]
    min_value: Option<Value>,
    #[serde(default)]
    max_value: Option<Value>,
    #[serde(default)]
    step: Option<Value>,
}

fn default_discard_missing() -> bool {
    true
}

#[derive(Serialize)]
struct BootstrapReport {
    session: BTreeMap<String, Value>,
    query: String,
    warnings: Vec<String>,
}

impl WidgetSpec {
    fn enum_type(&self) -> Option<EnumType> {
        self.enum_spec
            .as_ref()
            .map(|spec| EnumType::new(spec.name.clone(), spec.members.iter().cloned()))
    }

    /// Turn string values naming enum members into members.
    fn to_member(enum_type: Option<&EnumType>, value: Value) -> Value {
        match (enum_type, value) {
            (Some(enum_type), Value::Str(name)) => enum_type
                .member(&name)
                .map(Value::Enum)
                .unwrap_or(Value::Str(name)),
            (Some(enum_type), Value::List(items)) => Value::List(
                items
                    .into_iter()
                    .map(|item| Self::to_member(Some(enum_type), item))
                    .collect(),
            ),
            (_, value) => value,
        }
    }

    fn args(&self, enum_type: Option<&EnumType>) -> Result<WidgetArgs, String> {
        let mut args = WidgetArgs::new(self.label.clone().unwrap_or_default())
            .autoupdate(self.autoupdate);
        if let Some(key) = &self.key {
            args = args.key(key.clone());
        }
        if let Some(name) = &self.codec {
            let fallback = self
                .default
                .as_ref()
                .and_then(Value::as_bool)
                .unwrap_or(false);
            args = args.codec(codec_from_name(name, fallback, enum_type)?);
        }
        for (name, value) in [
            ("min_value", &self.min_value),
            ("max_value", &self.max_value),
            ("step", &self.step),
        ] {
            if let Some(value) = value {
                args = args.arg(name, value.clone());
            }
        }
        Ok(args)
    }

    fn number_default(&self) -> Result<NumberDefault, String> {
        if self.none_default {
            return Ok(NumberDefault::Empty);
        }
        match &self.default {
            None => Ok(NumberDefault::Min),
            Some(Value::Int(i)) => Ok(NumberDefault::Int(*i)),
            Some(Value::Float(x)) => Ok(NumberDefault::Float(*x)),
            Some(Value::Str(s)) if s == "min" => Ok(NumberDefault::Min),
            Some(other) => Err(format!("number_input default must be a number, got {}", other)),
        }
    }

    fn bootstrap(&self, ctx: &mut HeadlessContext) -> Result<Value, Box<dyn std::error::Error>> {
        let enum_type = self.enum_type();
        let args = self.args(enum_type.as_ref())?;
        let options: Vec<Value> = self
            .options
            .iter()
            .cloned()
            .map(|opt| Self::to_member(enum_type.as_ref(), opt))
            .collect();
        let default = if self.none_default {
            Value::None
        } else {
            Self::to_member(enum_type.as_ref(), self.default.clone().unwrap_or(Value::None))
        };
        let index = if self.none_default {
            None
        } else {
            Some(self.index.unwrap_or(0))
        };

        let result: SyncResult<Value> = match self.kind {
            ManifestKind::TextInput => ctx.text_input_qs(args, text_default(default, self.none_default)),
            ManifestKind::TextArea => ctx.text_area_qs(args, text_default(default, self.none_default)),
            ManifestKind::Selectbox => ctx.selectbox_qs(args, options, index),
            ManifestKind::Radio => ctx.radio_qs(args, options, index),
            ManifestKind::Multiselect => {
                ctx.multiselect_qs(args, options, default, self.discard_missing)
            }
            ManifestKind::Checkbox => ctx.checkbox_qs(args, default.as_bool().unwrap_or(false)),
            ManifestKind::Toggle => ctx.toggle_qs(args, default.as_bool().unwrap_or(false)),
            ManifestKind::NumberInput => ctx.number_input_qs(args, self.number_default()?),
        };
        Ok(result?)
    }
}

/// Text widgets start from "" unless a default or `none_default` is given.
fn text_default(default: Value, none_default: bool) -> Value {
    match default {
        Value::None if !none_default => Value::from(""),
        other => other,
    }
}

fn load_manifest(path: &Path) -> Result<Manifest, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read manifest '{}': {}", path.display(), e))?;
    let manifest: Manifest = toml::from_str(&content)
        .map_err(|e| format!("Failed to parse manifest '{}': {}", path.display(), e))?;
    Ok(manifest)
}

pub(crate) fn handle_bootstrap_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let manifest_path = matches
        .get_one::<String>("manifest")
        .ok_or("Manifest argument is required")?;
    let query_text = matches
        .get_one::<String>("query")
        .map(String::as_str)
        .unwrap_or("");
    let json_output = matches.get_flag("json");
    let edits = matches
        .get_many::<String>("set")
        .map(|sets| {
            sets.map(|raw| parse_assignment(raw))
                .collect::<Result<Vec<_>, _>>()
        })
        .transpose()?
        .unwrap_or_default();

    info!(
        event = "cli.bootstrap_started",
        manifest = %manifest_path,
        edits = edits.len()
    );

    let manifest = match load_manifest(Path::new(manifest_path)) {
        Ok(manifest) => manifest,
        Err(e) => {
            eprintln!("❌ {}", e);
            error!(event = "cli.bootstrap_failed", error = %e);
            return Err(e);
        }
    };

    let config = load_config_with_warning();
    let mut ctx = SyncContext::in_memory(query_text).with_config(&config);

    for spec in &manifest.widget {
        if let Err(e) = spec.bootstrap(&mut ctx) {
            let key = spec.key.as_deref().unwrap_or("<missing>");
            eprintln!("❌ Failed to bootstrap widget '{}': {}", key, e);
            error!(event = "cli.bootstrap_failed", key = key, error = %e);
            return Err(e);
        }
    }

    for (key, value) in edits {
        let enum_type = manifest
            .widget
            .iter()
            .find(|spec| spec.key.as_deref() == Some(key.as_str()))
            .and_then(WidgetSpec::enum_type);
        let value = WidgetSpec::to_member(enum_type.as_ref(), value);
        if let Err(e) = ctx.simulate_change(&key, value) {
            eprintln!("❌ Failed to apply edit to '{}': {}", key, e);
            error!(event = "cli.bootstrap_failed", key = %key, error = %e);
            return Err(e.into());
        }
    }

    let report = BootstrapReport {
        session: ctx
            .session()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect(),
        query: ctx.query().to_query_string(),
        warnings: ctx
            .take_warnings()
            .into_iter()
            .map(|w| match w.key {
                Some(key) => format!("{}: {}", key, w.message),
                None => w.message,
            })
            .collect(),
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Session state:");
        for (key, value) in &report.session {
            println!("  {} = {}", key, value);
        }
        println!("Query string: {}", report.query);
        for warning in &report.warnings {
            eprintln!("Warning: {}", warning);
        }
    }

    info!(
        event = "cli.bootstrap_completed",
        widgets = manifest.widget.len(),
        warnings = report.warnings.len()
    );
    Ok(())
}
