//! Search parameters for the query endpoints.
//!
//! Parameters keep the order they were added in. A key given several values
//! becomes an OR-query: the value list is expanded into repeated `key=value`
//! pairs, which is how the API expects alternatives
//! (`district_type=STATE_LOWER&district_type=STATE_UPPER`).
//!
//! The `id` parameter is special: the API takes it as a path segment
//! (`/official/123`) rather than in the query string, so it is held apart.

/// Value of one search parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    Single(String),
    /// Alternatives, matched if any one of them matches.
    AnyOf(Vec<String>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    id: Option<String>,
    pairs: Vec<(String, QueryValue)>,
}

impl QueryParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a single-valued parameter. `id` is routed to the request path.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        let key = key.into();
        if key == "id" {
            self.id = Some(value.to_string());
        } else {
            self.pairs.push((key, QueryValue::Single(value.to_string())));
        }
        self
    }

    /// Add an OR-query: `key` matches any of `values`.
    #[must_use]
    pub fn any_of<I, V>(mut self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: ToString,
    {
        let values = values.into_iter().map(|v| v.to_string()).collect();
        self.pairs.push((key.into(), QueryValue::AnyOf(values)));
        self
    }

    /// Look up an object by its Cicero id.
    #[must_use]
    pub fn id(mut self, id: impl ToString) -> Self {
        self.id = Some(id.to_string());
        self
    }

    /// Append one value for `key`, turning an existing parameter with the same
    /// key into an OR-query. Used when parameters arrive one pair at a time.
    pub fn push(&mut self, key: &str, value: impl ToString) {
        let value = value.to_string();
        if key == "id" {
            self.id = Some(value);
            return;
        }

        match self.pairs.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => {
                let previous = std::mem::replace(existing, QueryValue::AnyOf(Vec::new()));
                *existing = match previous {
                    QueryValue::Single(first) => QueryValue::AnyOf(vec![first, value]),
                    QueryValue::AnyOf(mut values) => {
                        values.push(value);
                        QueryValue::AnyOf(values)
                    }
                };
            }
            None => self.pairs.push((key.to_string(), QueryValue::Single(value))),
        }
    }

    /// The id to embed in the request path, if one was given.
    #[must_use]
    pub fn object_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.pairs.is_empty()
    }

    /// Percent-encode the parameters (without `id`) as a query string, no
    /// leading `?`.
    #[must_use]
    pub fn encode(&self) -> String {
        encode_pairs(self.pairs.iter().flat_map(|(key, value)| {
            let values: Vec<&str> = match value {
                QueryValue::Single(v) => vec![v.as_str()],
                QueryValue::AnyOf(vs) => vs.iter().map(String::as_str).collect(),
            };
            values.into_iter().map(move |v| (key.as_str(), v))
        }))
    }
}

/// Percent-encode `key=value` pairs joined with `&`.
pub(crate) fn encode_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    pairs
        .into_iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}
