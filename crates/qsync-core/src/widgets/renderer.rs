//! Rendering boundary and an in-process stand-in for the host UI.

use std::collections::BTreeMap;

use tracing::debug;

use crate::session::SessionState;
use crate::value::Value;
use crate::widgets::errors::WidgetError;
use crate::widgets::types::{WidgetDefault, WidgetKind, WidgetRequest};
use crate::writer::CallbackChain;

/// The host's widget constructors.
///
/// Called after bootstrap has seeded session state. Returns the widget's
/// current value.
pub trait WidgetRenderer {
    fn render(
        &mut self,
        request: WidgetRequest,
        session: &mut dyn SessionState,
    ) -> Result<Value, WidgetError>;
}

/// Renderer without a UI.
///
/// Behaves like a keyed host widget: the session value wins, otherwise the
/// widget default is stored and returned. Rejects arguments a real host
/// would reject, and keeps each widget's change handler so an edit can be
/// simulated.
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    rendered: Vec<WidgetRequest>,
    handlers: BTreeMap<String, CallbackChain>,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests in the order they were rendered.
    pub fn rendered(&self) -> &[WidgetRequest] {
        &self.rendered
    }

    pub fn on_change(&self, key: &str) -> Option<&CallbackChain> {
        self.handlers.get(key)
    }

    fn initial_value(request: &WidgetRequest) -> Result<Value, WidgetError> {
        match &request.default {
            WidgetDefault::Value(value) => Ok(value.clone()),
            WidgetDefault::Index(None) => Ok(Value::None),
            WidgetDefault::Index(Some(index)) => {
                request
                    .options
                    .get(*index)
                    .cloned()
                    .ok_or_else(|| WidgetError::Render {
                        key: request.key.clone(),
                        message: format!(
                            "index {} is out of range for {} options",
                            index,
                            request.options.len()
                        ),
                    })
            }
            WidgetDefault::Min => Ok(request
                .passthrough
                .get("min_value")
                .cloned()
                .unwrap_or(Value::Float(0.0))),
        }
    }

    fn check(request: &WidgetRequest, value: &Value) -> Result<(), WidgetError> {
        let reject = |message: String| WidgetError::Render {
            key: request.key.clone(),
            message,
        };

        match request.kind {
            WidgetKind::Multiselect => {
                for item in value.as_list().unwrap_or_default() {
                    if !request.options.contains(item) {
                        return Err(reject(format!(
                            "default value '{}' is not part of the options",
                            item
                        )));
                    }
                }
            }
            WidgetKind::NumberInput => {
                let Some(number) = value.as_f64() else {
                    return Ok(());
                };
                let bound = |name: &str| request.passthrough.get(name).and_then(Value::as_f64);
                if let Some(min) = bound("min_value")
                    && number < min
                {
                    return Err(reject(format!(
                        "value {} is less than min_value {}",
                        value, min
                    )));
                }
                if let Some(max) = bound("max_value")
                    && number > max
                {
                    return Err(reject(format!(
                        "value {} is greater than max_value {}",
                        value, max
                    )));
                }
            }
            _ => {}
        }
        Ok(())
    }
}

impl WidgetRenderer for HeadlessRenderer {
    fn render(
        &mut self,
        request: WidgetRequest,
        session: &mut dyn SessionState,
    ) -> Result<Value, WidgetError> {
        let value = match session.get(&request.key) {
            Some(existing) => existing.clone(),
            None => Self::initial_value(&request)?,
        };
        Self::check(&request, &value)?;
        session.set_default(&request.key, value.clone());

        match &request.on_change {
            Some(chain) => {
                self.handlers.insert(request.key.clone(), chain.clone());
            }
            None => {
                self.handlers.remove(&request.key);
            }
        }

        debug!(
            event = "core.render.completed",
            kind = %request.kind,
            key = %request.key,
            value = %value
        );
        self.rendered.push(request);
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemorySessionState;
    use crate::value::str_values;

    fn request(kind: WidgetKind, default: WidgetDefault) -> WidgetRequest {
        WidgetRequest {
            kind,
            label: "label".to_string(),
            key: "k".to_string(),
            options: str_values(["a", "b"]),
            default,
            on_change: None,
            passthrough: BTreeMap::new(),
        }
    }

    #[test]
    fn test_session_value_wins() {
        let mut renderer = HeadlessRenderer::new();
        let mut session: MemorySessionState = [("k", "b")].into_iter().collect();
        let value = renderer
            .render(
                request(WidgetKind::Selectbox, WidgetDefault::Index(Some(0))),
                &mut session,
            )
            .unwrap();
        assert_eq!(value, Value::from("b"));
        assert_eq!(renderer.rendered().len(), 1);
    }

    #[test]
    fn test_default_is_seeded() {
        let mut renderer = HeadlessRenderer::new();
        let mut session = MemorySessionState::new();
        let value = renderer
            .render(
                request(WidgetKind::Radio, WidgetDefault::Index(Some(1))),
                &mut session,
            )
            .unwrap();
        assert_eq!(value, Value::from("b"));
        assert_eq!(session.get("k"), Some(&Value::from("b")));
    }

    #[test]
    fn test_index_out_of_range_rejected() {
        let mut renderer = HeadlessRenderer::new();
        let mut session = MemorySessionState::new();
        let err = renderer
            .render(
                request(WidgetKind::Selectbox, WidgetDefault::Index(Some(5))),
                &mut session,
            )
            .unwrap_err();
        assert!(matches!(err, WidgetError::Render { .. }));
        assert!(session.is_empty());
    }

    #[test]
    fn test_multiselect_default_outside_options_rejected() {
        let mut renderer = HeadlessRenderer::new();
        let mut session = MemorySessionState::new();
        let default = WidgetDefault::Value(Value::List(str_values(["a", "z"])));
        let err = renderer
            .render(request(WidgetKind::Multiselect, default), &mut session)
            .unwrap_err();
        assert!(err.to_string().contains("'z'"));
    }

    #[test]
    fn test_number_bounds_and_min_default() {
        let mut renderer = HeadlessRenderer::new();
        let mut session = MemorySessionState::new();
        let mut req = request(WidgetKind::NumberInput, WidgetDefault::Min);
        req.passthrough.insert("min_value".to_string(), Value::Int(5));
        req.passthrough.insert("max_value".to_string(), Value::Int(10));
        assert_eq!(
            renderer.render(req.clone(), &mut session).unwrap(),
            Value::Int(5)
        );

        let mut session: MemorySessionState = [("k", 11)].into_iter().collect();
        let err = renderer.render(req, &mut session).unwrap_err();
        assert!(err.to_string().contains("greater than max_value"));
    }

    #[test]
    fn test_number_min_default_without_bounds() {
        let mut renderer = HeadlessRenderer::new();
        let mut session = MemorySessionState::new();
        let value = renderer
            .render(
                request(WidgetKind::NumberInput, WidgetDefault::Min),
                &mut session,
            )
            .unwrap();
        assert_eq!(value, Value::Float(0.0));
    }
}
