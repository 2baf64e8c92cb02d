use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

const PENDING_ACTION_KEY: &str = "pending_action";

/// An action awaiting an explicit yes/no from the user. The intake pipeline
/// only checks for its presence and clears it; the payload is opaque.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PendingAction(pub Value);

/// The JSON memory document: a free-form object with a `usuario` profile and
/// an optional `pending_action` slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoryDocument(Map<String, Value>);

impl Default for MemoryDocument {
    fn default() -> Self {
        let mut map = Map::new();
        map.insert(
            "usuario".to_string(),
            json!({
                "perfil": "programador",
                "interesses": ["python", "diversas linguagens", "tecnologia"]
            }),
        );
        Self(map)
    }
}

impl MemoryDocument {
    pub fn empty() -> Self {
        Self(Map::new())
    }

    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Profile description from `usuario.perfil`.
    pub fn profile(&self) -> Option<&str> {
        self.0.get("usuario")?.get("perfil")?.as_str()
    }

    /// Declared interests from `usuario.interesses` (non-string items skipped).
    pub fn interests(&self) -> Vec<&str> {
        self.0
            .get("usuario")
            .and_then(|u| u.get("interesses"))
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// Recursive merge: nested objects merge key by key, anything else is
    /// replaced wholesale.
    pub fn merge(&mut self, patch: &Map<String, Value>) {
        merge_into(&mut self.0, patch);
    }

    pub fn pending_action(&self) -> Option<PendingAction> {
        self.0
            .get(PENDING_ACTION_KEY)
            .filter(|v| !v.is_null())
            .cloned()
            .map(PendingAction)
    }

    pub fn set_pending_action(&mut self, action: PendingAction) {
        self.0.insert(PENDING_ACTION_KEY.to_string(), action.0);
    }

    /// Returns `true` when a pending action was present.
    pub fn clear_pending_action(&mut self) -> bool {
        self.0.remove(PENDING_ACTION_KEY).is_some()
    }
}

fn merge_into(base: &mut Map<String, Value>, patch: &Map<String, Value>) {
    for (key, value) in patch {
        match (base.get_mut(key), value) {
            (Some(Value::Object(existing)), Value::Object(incoming)) => {
                merge_into(existing, incoming);
            }
            _ => {
                base.insert(key.clone(), value.clone());
            }
        }
    }
}
