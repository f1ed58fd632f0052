use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Treat an explicit JSON `null` the same as a missing field.
///
/// Figma occasionally sends `"children": null` or `"fills": null`; with a plain
/// `#[serde(default)]` those would fail to deserialize.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    let opt = Option::<T>::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}

/// Serialize a float as a JSON integer when it has no fractional part.
pub(crate) fn whole_number<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        serializer.serialize_i64(*value as i64)
    } else {
        value.serialize(serializer)
    }
}

/// [`whole_number`] applied to every value of a name-to-number map.
pub(crate) fn whole_number_map<S>(
    map: &IndexMap<String, f64>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    struct Whole(f64);

    impl Serialize for Whole {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            whole_number(&self.0, serializer)
        }
    }

    serializer.collect_map(map.iter().map(|(name, value)| (name, Whole(*value))))
}
