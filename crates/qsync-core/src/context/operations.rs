use tracing::{debug, info, warn};

use crate::codec::{Codec, ConfigWarning, Inference, infer_codec};
use crate::config::QsyncConfig;
use crate::context::types::{SyncScope, SyncSettings};
use crate::errors::SyncResult;
use crate::keys::{Blacklist, KeySelector};
use crate::query::{MemoryQueryParams, QueryParams};
use crate::session::{MemorySessionState, SessionState};
use crate::value::Value;
use crate::widgets::{HeadlessRenderer, WidgetRenderer, WidgetRequest};
use crate::writer::{self, Callback, CallbackChain};

/// Coordinates widget bootstrap and query-string export for one session.
///
/// Owns the host boundaries (session store, query parameters, renderer)
/// together with the blacklist and settings that every export consults.
#[derive(Debug)]
pub struct SyncContext<S, Q, R> {
    pub(crate) session: S,
    pub(crate) query: Q,
    pub(crate) renderer: R,
    pub(crate) blacklist: Blacklist,
    pub(crate) settings: SyncSettings,
    pub(crate) warnings: Vec<ConfigWarning>,
}

impl SyncContext<MemorySessionState, MemoryQueryParams, HeadlessRenderer> {
    /// Fresh in-memory session whose URL carries `query`.
    pub fn in_memory(query: &str) -> Self {
        Self::new(
            MemorySessionState::new(),
            MemoryQueryParams::parse(query),
            HeadlessRenderer::new(),
        )
    }
}

impl<S, Q, R> SyncContext<S, Q, R>
where
    S: SessionState,
    Q: QueryParams,
    R: WidgetRenderer,
{
    pub fn new(session: S, query: Q, renderer: R) -> Self {
        Self {
            session,
            query,
            renderer,
            blacklist: Blacklist::new(),
            settings: SyncSettings::default(),
            warnings: Vec::new(),
        }
    }

    /// Apply loaded configuration: settings and blacklist seed.
    pub fn with_config(mut self, config: &QsyncConfig) -> Self {
        self.settings = SyncSettings {
            warnings_enabled: config.warnings.enabled(),
            drop_empty_values: config.export_policy().drop_empty,
        };
        for key in config.blacklist().iter() {
            self.blacklist.add(key);
        }
        self
    }

    pub fn with_settings(mut self, settings: SyncSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut S {
        &mut self.session
    }

    pub fn query(&self) -> &Q {
        &self.query
    }

    pub fn query_mut(&mut self) -> &mut Q {
        &mut self.query
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn blacklist(&self) -> &Blacklist {
        &self.blacklist
    }

    pub fn settings(&self) -> SyncSettings {
        self.settings
    }

    pub fn blacklist_key(&mut self, key: impl Into<String>) {
        self.blacklist.add(key);
    }

    /// Does nothing if `key` is not blacklisted.
    pub fn unblacklist_key(&mut self, key: &str) {
        self.blacklist.remove(key);
    }

    /// Configuration warnings collected so far.
    pub fn warnings(&self) -> &[ConfigWarning] {
        &self.warnings
    }

    pub fn take_warnings(&mut self) -> Vec<ConfigWarning> {
        std::mem::take(&mut self.warnings)
    }

    pub fn scope(&mut self) -> SyncScope<'_> {
        SyncScope {
            session: &mut self.session,
            query: &mut self.query,
            blacklist: &self.blacklist,
            settings: self.settings,
        }
    }

    pub fn run(&mut self, callback: &Callback) -> SyncResult<()> {
        callback.call(&mut self.scope())
    }

    pub fn fire(&mut self, chain: &CallbackChain) -> SyncResult<()> {
        debug!(
            event = "core.callback.fired",
            name = chain.name(),
            steps = chain.len()
        );
        chain.invoke(&mut self.scope())
    }

    /// Query string for the selected session values. No side effects.
    pub fn make_permalink(&self, selector: &KeySelector) -> SyncResult<String> {
        let link = writer::make_permalink(
            &self.session,
            &self.blacklist,
            selector,
            self.settings.export_policy(false),
        )?;
        Ok(link)
    }

    pub fn set_qs(&mut self, selector: KeySelector) -> SyncResult<()> {
        self.run(&writer::set_qs_callback(selector))
    }

    pub fn add_qs(&mut self, selector: KeySelector) -> SyncResult<()> {
        self.run(&writer::add_qs_callback(selector))
    }

    pub fn update_qs(&mut self, selector: KeySelector) -> SyncResult<()> {
        self.run(&writer::update_qs_callback(selector))
    }

    pub fn clear_qs(&mut self, selector: KeySelector) -> SyncResult<()> {
        self.run(&writer::clear_qs_callback(selector))
    }

    /// Codec for a selection widget, recording a warning if the options
    /// cannot be read back from the URL.
    pub(crate) fn resolve_codec(&mut self, key: &str, options: &[Value], codec: Codec) -> Codec {
        let Inference { codec, warning } = infer_codec(options, codec);
        if let Some(warning) = warning {
            self.record_warning(key, warning);
        }
        codec
    }

    fn record_warning(&mut self, key: &str, warning: ConfigWarning) {
        if !self.settings.warnings_enabled {
            return;
        }
        warn!(
            event = "core.codec.inference_failed",
            key = key,
            kinds = ?warning.detected_kinds
        );
        self.warnings.push(ConfigWarning {
            key: Some(key.to_string()),
            ..warning
        });
    }

    /// Store `value` under `key` unless the session already has one.
    pub(crate) fn seed(&mut self, key: &str, value: Value) {
        if self.session.contains_key(key) {
            return;
        }
        info!(event = "core.widget.seeded", key = key, value = %value);
        self.session.insert(key, value);
    }

    pub(crate) fn render(&mut self, request: WidgetRequest) -> SyncResult<Value> {
        let value = self.renderer.render(request, &mut self.session)?;
        Ok(value)
    }
}

impl<S, Q> SyncContext<S, Q, HeadlessRenderer>
where
    S: SessionState,
    Q: QueryParams,
{
    /// Act as the user editing widget `key`: store the new value, then run
    /// the widget's change handler if it has one.
    pub fn simulate_change(&mut self, key: &str, value: Value) -> SyncResult<()> {
        self.session.insert(key, value);
        match self.renderer.on_change(key).cloned() {
            Some(chain) => self.fire(&chain),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ExportConfig, WarningsConfig};
    use crate::widgets::WidgetArgs;

    #[test]
    fn test_with_config_seeds_blacklist_and_settings() {
        let config = QsyncConfig {
            warnings: WarningsConfig {
                enabled: Some(false),
            },
            export: ExportConfig {
                blacklist: vec!["secret".to_string()],
                drop_empty_values: Some(true),
            },
        };
        let ctx = SyncContext::in_memory("").with_config(&config);
        assert!(ctx.blacklist().contains("secret"));
        assert!(!ctx.settings().warnings_enabled);
        assert!(ctx.settings().drop_empty_values);
    }

    #[test]
    fn test_with_config_extends_existing_blacklist() {
        let mut ctx = SyncContext::in_memory("");
        ctx.blacklist_key("page");
        let config = QsyncConfig {
            export: ExportConfig {
                blacklist: vec!["secret".to_string()],
                drop_empty_values: None,
            },
            ..QsyncConfig::default()
        };
        let ctx = ctx.with_config(&config);
        assert!(ctx.blacklist().contains("page"));
        assert!(ctx.blacklist().contains("secret"));
        assert_eq!(config.blacklist().iter().count(), 1);
        assert!(!config.export_policy().drop_empty);
    }

    #[test]
    fn test_blacklist_methods_gate_exports() {
        let mut ctx = SyncContext::in_memory("");
        ctx.session_mut().insert("a3", Value::from(1));
        ctx.session_mut().insert("b3", Value::from(2));
        ctx.session_mut().insert("b2", Value::from(3));

        let selector = KeySelector::keys(["a3"]).with_patterns(["b.$"]).unwrap();
        assert_eq!(ctx.make_permalink(&selector).unwrap(), "?a3=1&b2=3&b3=2");

        ctx.blacklist_key("b2");
        assert_eq!(ctx.make_permalink(&selector).unwrap(), "?a3=1&b3=2");

        ctx.unblacklist_key("b2");
        ctx.unblacklist_key("never-added");
        assert_eq!(ctx.make_permalink(&selector).unwrap(), "?a3=1&b2=3&b3=2");
    }

    #[test]
    fn test_export_helpers() {
        let mut ctx = SyncContext::in_memory("?stale=1");
        ctx.session_mut().insert("x", Value::from("y"));
        ctx.set_qs(KeySelector::all()).unwrap();
        assert_eq!(ctx.query().to_query_string(), "?x=y");
        ctx.session_mut().insert("x", Value::None);
        ctx.add_qs(KeySelector::all()).unwrap();
        assert_eq!(ctx.query().to_query_string(), "?x=y");
        ctx.update_qs(KeySelector::keys(["x"])).unwrap();
        assert_eq!(ctx.query().to_query_string(), "?");
        ctx.query_mut().update(&[("z".to_string(), vec!["1".to_string()])]);
        ctx.clear_qs(KeySelector::all()).unwrap();
        assert!(ctx.query().is_empty());
    }

    #[test]
    fn test_warnings_collected_with_key() {
        let mut ctx = SyncContext::in_memory("");
        let options = vec![Value::Int(1), Value::Float(1.5)];
        ctx.selectbox_qs(WidgetArgs::new("n").key("pick"), options, Some(0))
            .unwrap();
        assert_eq!(ctx.warnings().len(), 1);
        assert_eq!(ctx.warnings()[0].key.as_deref(), Some("pick"));
        assert_eq!(ctx.take_warnings().len(), 1);
        assert!(ctx.warnings().is_empty());
    }

    #[test]
    fn test_warnings_suppressed_when_disabled() {
        let mut ctx = SyncContext::in_memory("").with_settings(SyncSettings {
            warnings_enabled: false,
            drop_empty_values: false,
        });
        let options = vec![Value::Int(1), Value::from("two")];
        ctx.selectbox_qs(WidgetArgs::new("n").key("pick"), options, Some(0))
            .unwrap();
        assert!(ctx.warnings().is_empty());
    }

    #[test]
    fn test_simulate_change_without_handler() {
        let mut ctx = SyncContext::in_memory("");
        ctx.text_input_qs(WidgetArgs::new("t").key("t"), "")
            .unwrap();
        ctx.simulate_change("t", Value::from("typed")).unwrap();
        assert_eq!(ctx.session().get("t"), Some(&Value::from("typed")));
        assert!(ctx.query().is_empty());
        assert_eq!(ctx.renderer().rendered().len(), 1);
    }
}
