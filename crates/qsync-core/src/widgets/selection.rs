//! Bootstrap for widgets that choose from an option set.

use tracing::debug;

use crate::context::SyncContext;
use crate::errors::SyncResult;
use crate::query::{QueryParams, read_index, read_list};
use crate::session::SessionState;
use crate::value::{Value, ensure_list};
use crate::widgets::autoupdate::compose_on_change;
use crate::widgets::errors::WidgetError;
use crate::widgets::renderer::WidgetRenderer;
use crate::widgets::types::{WidgetArgs, WidgetDefault, WidgetKind, WidgetRequest};
use crate::widgets::validation::{ensure_no_none_options, require_key};

impl<S, Q, R> SyncContext<S, Q, R>
where
    S: SessionState,
    Q: QueryParams,
    R: WidgetRenderer,
{
    /// Select box whose initial selection can come from the URL.
    ///
    /// `index` is the default selection; `None` means nothing selected.
    pub fn selectbox_qs(
        &mut self,
        args: WidgetArgs,
        options: Vec<Value>,
        index: Option<usize>,
    ) -> SyncResult<Value> {
        let (args, key, _) = self.bootstrap_index(WidgetKind::Selectbox, args, &options, index)?;
        self.render_selection(WidgetKind::Selectbox, args, key, options, index, index.is_none())
    }

    /// Radio group whose initial selection can come from the URL.
    pub fn radio_qs(
        &mut self,
        args: WidgetArgs,
        options: Vec<Value>,
        index: Option<usize>,
    ) -> SyncResult<Value> {
        let (args, key, query_index) =
            self.bootstrap_index(WidgetKind::Radio, args, &options, index)?;
        self.render_selection(WidgetKind::Radio, args, key, options, query_index, index.is_none())
    }

    /// Multi-select whose initial selection can come from the URL.
    ///
    /// Query values are matched against `options` in query order. Values that
    /// are not options are dropped, or rejected when `discard_missing` is
    /// false. A scalar `default` is treated as a one-item list.
    pub fn multiselect_qs(
        &mut self,
        args: WidgetArgs,
        options: Vec<Value>,
        default: Value,
        discard_missing: bool,
    ) -> SyncResult<Value> {
        let kind = WidgetKind::Multiselect;
        let key = require_key(kind, &args)?;
        ensure_no_none_options(kind, &options)?;

        let default_is_none = default.is_none();
        let default_list = ensure_list(default);
        let codec = self.resolve_codec(&key, &options, args.codec.clone());
        let from_query = read_list(&self.query, &key, default_list.clone(), &codec)?;

        let (subset, missing): (Vec<Value>, Vec<Value>) = from_query
            .iter()
            .cloned()
            .partition(|item| options.contains(item));

        if !discard_missing && !missing.is_empty() {
            return Err(WidgetError::MissingOptions {
                key,
                missing: missing.iter().map(ToString::to_string).collect(),
            }
            .into());
        }
        if !missing.is_empty() {
            debug!(
                event = "core.widget.options_discarded",
                key = %key,
                count = missing.len()
            );
        }
        if from_query != default_list {
            self.seed(&key, Value::List(subset));
        }

        let on_change = compose_on_change(&key, args.autoupdate, default_is_none, args.on_change);
        self.render(WidgetRequest {
            kind,
            label: args.label,
            key,
            options,
            default: WidgetDefault::Value(Value::List(default_list)),
            on_change,
            passthrough: args.passthrough,
        })
    }

    /// Validate, resolve the URL selection and seed it.
    fn bootstrap_index(
        &mut self,
        kind: WidgetKind,
        args: WidgetArgs,
        options: &[Value],
        index: Option<usize>,
    ) -> SyncResult<(WidgetArgs, String, Option<usize>)> {
        let key = require_key(kind, &args)?;
        ensure_no_none_options(kind, options)?;

        let codec = self.resolve_codec(&key, options, args.codec.clone());
        let query_index = read_index(&self.query, &key, options, index, &codec);
        if let Some(selected) = query_index.and_then(|i| options.get(i)) {
            self.seed(&key, selected.clone());
        }
        Ok((args, key, query_index))
    }

    fn render_selection(
        &mut self,
        kind: WidgetKind,
        args: WidgetArgs,
        key: String,
        options: Vec<Value>,
        index: Option<usize>,
        default_is_none: bool,
    ) -> SyncResult<Value> {
        let on_change = compose_on_change(&key, args.autoupdate, default_is_none, args.on_change);
        self.render(WidgetRequest {
            kind,
            label: args.label,
            key,
            options,
            default: WidgetDefault::Index(index),
            on_change,
            passthrough: args.passthrough,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::codec::{Codec, NumericType};
    use crate::context::SyncContext;
    use crate::errors::SyncError;
    use crate::keys::KeySelector;
    use crate::query::QueryParams;
    use crate::session::SessionState;
    use crate::value::{EnumType, Value, str_values};
    use crate::widgets::errors::WidgetError;
    use crate::widgets::types::WidgetArgs;

    #[test]
    fn test_selectbox_reads_query() {
        let mut ctx = SyncContext::in_memory("?pick=b");
        let value = ctx
            .selectbox_qs(WidgetArgs::new("Pick").key("pick"), str_values(["a", "b"]), Some(0))
            .unwrap();
        assert_eq!(value, Value::from("b"));
        assert_eq!(ctx.session().get("pick"), Some(&Value::from("b")));
    }

    #[test]
    fn test_selectbox_unknown_query_value_uses_default() {
        let mut ctx = SyncContext::in_memory("?pick=zzz");
        let value = ctx
            .selectbox_qs(WidgetArgs::new("Pick").key("pick"), str_values(["a", "b"]), Some(1))
            .unwrap();
        assert_eq!(value, Value::from("b"));
    }

    #[test]
    fn test_selectbox_multiple_values_use_default() {
        let mut ctx = SyncContext::in_memory("?pick=a&pick=b");
        let value = ctx
            .selectbox_qs(WidgetArgs::new("Pick").key("pick"), str_values(["a", "b"]), None)
            .unwrap();
        assert_eq!(value, Value::None);
    }

    #[test]
    fn test_selectbox_keeps_existing_session_value() {
        let mut ctx = SyncContext::in_memory("?pick=b");
        ctx.session_mut().insert("pick", Value::from("a"));
        let value = ctx
            .selectbox_qs(WidgetArgs::new("Pick").key("pick"), str_values(["a", "b"]), Some(0))
            .unwrap();
        assert_eq!(value, Value::from("a"));
    }

    #[test]
    fn test_selectbox_infers_int_codec() {
        let mut ctx = SyncContext::in_memory("?n=3");
        let options = vec![Value::Int(1), Value::Int(2), Value::Int(3)];
        let value = ctx
            .selectbox_qs(WidgetArgs::new("n").key("n"), options, Some(0))
            .unwrap();
        assert_eq!(value, Value::Int(3));
        assert!(ctx.warnings().is_empty());
    }

    #[test]
    fn test_selectbox_infers_enum_codec() {
        let color = EnumType::new("Color", ["Red", "Green"]);
        let mut ctx = SyncContext::in_memory("?c=Color.Green");
        let value = ctx
            .selectbox_qs(WidgetArgs::new("c").key("c"), color.values(), Some(0))
            .unwrap();
        assert_eq!(value, Value::Enum(color.member("Green").unwrap()));
    }

    #[test]
    fn test_selectbox_explicit_codec_wins() {
        let mut ctx = SyncContext::in_memory("?x=2");
        let options = vec![Value::Float(1.0), Value::Float(2.0)];
        let args = WidgetArgs::new("x")
            .key("x")
            .codec(Codec::Numeric(NumericType::Float));
        assert_eq!(ctx.selectbox_qs(args, options, None).unwrap(), Value::Float(2.0));
    }

    #[test]
    fn test_selectbox_requires_key() {
        let mut ctx = SyncContext::in_memory("");
        let err = ctx
            .selectbox_qs(WidgetArgs::new("Pick"), str_values(["a"]), Some(0))
            .unwrap_err();
        assert!(matches!(
            err,
            SyncError::Widget(WidgetError::MissingKey {
                widget: "selectbox_qs"
            })
        ));
    }

    #[test]
    fn test_none_option_rejected_before_seeding() {
        let mut ctx = SyncContext::in_memory("?pick=a");
        let err = ctx
            .radio_qs(
                WidgetArgs::new("Pick").key("pick"),
                vec![Value::from("a"), Value::None],
                Some(0),
            )
            .unwrap_err();
        assert!(matches!(err, SyncError::Widget(WidgetError::NoneOption { .. })));
        assert!(ctx.session().get("pick").is_none());
    }

    #[test]
    fn test_radio_renders_query_index() {
        let mut ctx = SyncContext::in_memory("?r=c");
        let value = ctx
            .radio_qs(WidgetArgs::new("r").key("r"), str_values(["a", "b", "c"]), Some(0))
            .unwrap();
        assert_eq!(value, Value::from("c"));
        let rendered = &ctx.renderer().rendered()[0];
        assert_eq!(
            rendered.default,
            crate::widgets::types::WidgetDefault::Index(Some(2))
        );
    }

    #[test]
    fn test_radio_without_default_clears_url_on_none() {
        let mut ctx = SyncContext::in_memory("?r=b");
        let value = ctx
            .radio_qs(
                WidgetArgs::new("r").key("r").autoupdate(true),
                str_values(["a", "b"]),
                None,
            )
            .unwrap();
        assert_eq!(value, Value::from("b"));
        assert_eq!(ctx.renderer().on_change("r").unwrap().name(), "update_qs");

        ctx.simulate_change("r", Value::None).unwrap();
        assert!(!ctx.query().contains_key("r"));
    }

    #[test]
    fn test_radio_with_default_keeps_add_policy() {
        let mut ctx = SyncContext::in_memory("?r=b");
        ctx.radio_qs(
            WidgetArgs::new("r").key("r").autoupdate(true),
            str_values(["a", "b"]),
            Some(0),
        )
        .unwrap();
        assert_eq!(ctx.renderer().on_change("r").unwrap().name(), "add_qs");
    }

    #[test]
    fn test_multiselect_end_to_end() {
        let mut ctx = SyncContext::in_memory("?multi=Streamlit&multi=QS&multi=Rocks");
        let options = str_values(["Streamlit", "QS", "Rocks", "I", "Don't", "Know"]);
        let default = Value::List(str_values(["I", "Don't", "Know"]));
        let value = ctx
            .multiselect_qs(WidgetArgs::new("multi").key("multi"), options, default, true)
            .unwrap();
        let expected = Value::List(str_values(["Streamlit", "QS", "Rocks"]));
        assert_eq!(value, expected);
        assert_eq!(ctx.session().get("multi"), Some(&expected));
    }

    #[test]
    fn test_multiselect_discards_missing() {
        let mut ctx = SyncContext::in_memory("?m=1&m=5&m=7");
        let value = ctx
            .multiselect_qs(
                WidgetArgs::new("m").key("m"),
                str_values(["3", "1", "5"]),
                Value::None,
                true,
            )
            .unwrap();
        assert_eq!(value, Value::List(str_values(["1", "5"])));
    }

    #[test]
    fn test_multiselect_strict_rejects_missing() {
        let mut ctx = SyncContext::in_memory("?m=1&m=5&m=7");
        let err = ctx
            .multiselect_qs(
                WidgetArgs::new("m").key("m"),
                str_values(["3", "1", "5"]),
                Value::None,
                false,
            )
            .unwrap_err();
        match err {
            SyncError::Widget(WidgetError::MissingOptions { key, missing }) => {
                assert_eq!(key, "m");
                assert_eq!(missing, vec!["7"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_multiselect_scalar_default_and_absent_query() {
        let mut ctx = SyncContext::in_memory("");
        let value = ctx
            .multiselect_qs(
                WidgetArgs::new("m").key("m"),
                str_values(["a", "b"]),
                Value::from("b"),
                true,
            )
            .unwrap();
        assert_eq!(value, Value::List(str_values(["b"])));
    }

    #[test]
    fn test_multiselect_autoupdate_writes_url() {
        let mut ctx = SyncContext::in_memory("?other=x");
        ctx.multiselect_qs(
            WidgetArgs::new("m").key("m").autoupdate(true),
            str_values(["a", "b", "c"]),
            Value::None,
            true,
        )
        .unwrap();
        ctx.simulate_change("m", Value::List(str_values(["c", "a"])))
            .unwrap();
        assert_eq!(ctx.query().to_query_string(), "?other=x&m=c&m=a");

        ctx.simulate_change("m", Value::None).unwrap();
        assert_eq!(ctx.query().to_query_string(), "?other=x");
    }

    #[test]
    fn test_selectbox_autoupdate_respects_blacklist() {
        let mut ctx = SyncContext::in_memory("");
        ctx.blacklist_key("pick");
        ctx.selectbox_qs(
            WidgetArgs::new("Pick").key("pick").autoupdate(true),
            str_values(["a", "b"]),
            Some(0),
        )
        .unwrap();
        ctx.simulate_change("pick", Value::from("b")).unwrap();
        assert!(ctx.query().is_empty());
        assert_eq!(
            ctx.make_permalink(&KeySelector::all()).unwrap(),
            "?"
        );
    }
}
