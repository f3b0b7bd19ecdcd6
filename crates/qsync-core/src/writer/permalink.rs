use crate::codec::urlencoded::encode_pairs;
use crate::keys::{Blacklist, ExportPolicy, KeyFilterError, KeySelector};
use crate::session::SessionState;

/// Encoded query string (with the leading `?`) for the selected session
/// values. Keys are sorted; list values become repeated pairs.
pub fn make_permalink<S: SessionState + ?Sized>(
    session: &S,
    blacklist: &Blacklist,
    selector: &KeySelector,
    policy: ExportPolicy,
) -> Result<String, KeyFilterError> {
    let projection = selector.project(session, blacklist, policy)?;
    let entries: Vec<(String, String)> = projection
        .iter()
        .flat_map(|(key, value)| {
            value
                .to_query_values()
                .into_iter()
                .map(move |v| (key.clone(), v))
        })
        .collect();
    Ok(format!(
        "?{}",
        encode_pairs(entries.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemorySessionState;
    use crate::value::Value;

    fn session() -> MemorySessionState {
        [
            ("a3", Value::from("hi")),
            ("b3", Value::from("hello world")),
            ("b2", Value::from(3)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_permalink_single_key() {
        let link = make_permalink(
            &session(),
            &Blacklist::new(),
            &KeySelector::keys(["b3"]),
            ExportPolicy::default(),
        )
        .unwrap();
        assert_eq!(link, "?b3=hello+world");
    }

    #[test]
    fn test_permalink_sorted_and_repeated() {
        let mut session = session();
        session.insert(
            "multi",
            Value::List(vec![Value::from("x"), Value::from(1.5)]),
        );
        session.insert("gone", Value::None);
        let link = make_permalink(
            &session,
            &Blacklist::new(),
            &KeySelector::all(),
            ExportPolicy::default(),
        )
        .unwrap();
        assert_eq!(link, "?a3=hi&b2=3&b3=hello+world&multi=x&multi=1.5");
    }

    #[test]
    fn test_permalink_has_no_side_effect() {
        let session = session();
        let before = session.clone();
        make_permalink(
            &session,
            &Blacklist::new(),
            &KeySelector::all(),
            ExportPolicy::default(),
        )
        .unwrap();
        assert_eq!(session, before);
    }

    #[test]
    fn test_permalink_drop_empty_policy() {
        let mut session = session();
        session.insert("empty", Value::from(""));
        let selector = KeySelector::keys(["empty", "a3"]);
        let kept = make_permalink(&session, &Blacklist::new(), &selector, ExportPolicy::default())
            .unwrap();
        assert_eq!(kept, "?a3=hi&empty=");
        let dropped = make_permalink(
            &session,
            &Blacklist::new(),
            &selector,
            ExportPolicy {
                keep_none: false,
                drop_empty: true,
            },
        )
        .unwrap();
        assert_eq!(dropped, "?a3=hi");
    }
}
