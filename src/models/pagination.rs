use serde::Deserialize;

/// Pagination block the backend returns alongside every list payload.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PageMeta {
    pub current_page: u32,
    #[serde(default)]
    pub from: Option<u32>,
    pub last_page: u32,
    #[serde(default)]
    pub path: String,
    pub per_page: u32,
    #[serde(default)]
    pub to: Option<u32>,
    pub total: u64,
    #[serde(default)]
    pub next_page_url: Option<String>,
    #[serde(default)]
    pub prev_page_url: Option<String>,
}

impl PageMeta {
    /// The only client-side invariant: requested pages stay within
    /// `[1, last_page]`.
    pub fn clamp_page(&self, requested: u32) -> u32 {
        requested.max(1).min(self.last_page.max(1))
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.last_page
    }

    pub fn summary(&self) -> String {
        match (self.from, self.to) {
            (Some(from), Some(to)) => format!("Showing {from}\u{2013}{to} of {}", self.total),
            _ => format!("{} total", self.total),
        }
    }
}

/// One page of records plus its metadata. The backend produces two
/// envelope shapes, `{data, meta: {...}}` and the flat paginator with
/// the meta fields inline; both decode to the same value.
#[derive(Debug, Clone, PartialEq)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Paginated<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Envelope<T> {
            Wrapped { data: Vec<T>, meta: PageMeta },
            Flat {
                data: Vec<T>,
                #[serde(flatten)]
                meta: PageMeta,
            },
        }

        match Envelope::deserialize(deserializer)? {
            Envelope::Wrapped { data, meta } | Envelope::Flat { data, meta } => {
                Ok(Paginated { data, meta })
            }
        }
    }
}

/// Single-resource responses are usually wrapped under `data`, but a few
/// endpoints return the record bare. Accept both.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum MaybeWrapped<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> MaybeWrapped<T> {
    pub fn into_inner(self) -> T {
        match self {
            MaybeWrapped::Wrapped { data } => data,
            MaybeWrapped::Bare(record) => record,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(current: u32, last: u32) -> PageMeta {
        PageMeta {
            current_page: current,
            from: Some(1),
            last_page: last,
            path: "/api/pens".to_string(),
            per_page: 15,
            to: Some(15),
            total: 42,
            next_page_url: None,
            prev_page_url: None,
        }
    }

    #[test]
    fn test_clamp_page_invariant() {
        let meta = meta(2, 3);
        assert_eq!(meta.clamp_page(0), 1);
        assert_eq!(meta.clamp_page(2), 2);
        assert_eq!(meta.clamp_page(99), 3);
    }

    #[test]
    fn test_clamp_page_with_empty_list() {
        let mut meta = meta(1, 0);
        meta.last_page = 0;
        assert_eq!(meta.clamp_page(5), 1);
    }

    #[test]
    fn test_wrapped_envelope_parses() {
        let body = r#"{
            "data": [1, 2, 3],
            "meta": {
                "current_page": 1,
                "from": 1,
                "last_page": 2,
                "path": "/api/pens",
                "per_page": 3,
                "to": 3,
                "total": 5
            }
        }"#;
        let page: Paginated<u32> = serde_json::from_str(body).expect("wrapped parses");
        assert_eq!(page.data, vec![1, 2, 3]);
        assert_eq!(page.meta.last_page, 2);
    }

    #[test]
    fn test_flat_envelope_parses() {
        let body = r#"{
            "current_page": 2,
            "data": [4, 5],
            "first_page_url": "/api/pens?page=1",
            "from": 4,
            "last_page": 2,
            "next_page_url": null,
            "path": "/api/pens",
            "per_page": 3,
            "prev_page_url": "/api/pens?page=1",
            "to": 5,
            "total": 5
        }"#;
        let page: Paginated<u32> = serde_json::from_str(body).expect("flat parses");
        assert_eq!(page.data, vec![4, 5]);
        assert_eq!(page.meta.current_page, 2);
        assert_eq!(page.meta.prev_page_url.as_deref(), Some("/api/pens?page=1"));
    }

    #[test]
    fn test_maybe_wrapped_accepts_both_shapes() {
        let wrapped: MaybeWrapped<u32> =
            serde_json::from_str(r#"{"data": 7}"#).expect("wrapped parses");
        let bare: MaybeWrapped<u32> = serde_json::from_str("7").expect("bare parses");
        assert_eq!(wrapped.into_inner(), 7);
        assert_eq!(bare.into_inner(), 7);
    }
}
