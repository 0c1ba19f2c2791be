// src/common/patch.rs

use serde::{Deserialize, Deserializer};

/// Desserializa um campo anulável de PATCH preservando a presença.
///
/// Use junto com `#[serde(default)]`:
/// - campo ausente      -> `None`
/// - campo `null`       -> `Some(None)`
/// - campo com valor    -> `Some(Some(v))`
pub fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Aplica um campo presente no payload sobre o valor atual.
pub fn merge<T>(target: &mut T, incoming: Option<T>) {
    if let Some(value) = incoming {
        *target = value;
    }
}
