use fnv::FnvHashSet;

/// Resolve the overlay's key for a marker element from its attributes.
///
/// An `id` wins when present and non-empty. Otherwise the key is
/// `type:value`, with `unknown` standing in for a missing or empty type and
/// `?` for a missing value. An empty `value` attribute is kept as is.
pub fn marker_identity(id: Option<&str>, kind: Option<&str>, value: Option<&str>) -> String {
    if let Some(id) = id.filter(|s| !s.is_empty()) {
        return id.to_string();
    }
    let kind = kind.filter(|s| !s.is_empty()).unwrap_or("unknown");
    format!("{}:{}", kind, value.unwrap_or("?"))
}

/// Identities of markers currently in view.
///
/// Membership is a set; the insertion order is kept only so the Markers view
/// lists chips in the order they appeared.
#[derive(Clone, Debug, Default)]
pub struct VisibleMarkers {
    order: Vec<String>,
    members: FnvHashSet<String>,
}

impl VisibleMarkers {
    /// Returns `true` if the identity was not already visible.
    pub fn insert(&mut self, id: &str) -> bool {
        if !self.members.insert(id.to_string()) {
            return false;
        }
        self.order.push(id.to_string());
        true
    }

    /// Returns `true` if the identity was visible.
    pub fn remove(&mut self, id: &str) -> bool {
        if !self.members.remove(id) {
            return false;
        }
        self.order.retain(|m| m != id);
        true
    }

    #[inline]
    pub fn contains(&self, id: &str) -> bool {
        self.members.contains(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.members.clear();
    }
}
