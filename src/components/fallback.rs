use super::{ComponentSpec, PropertyBag, PropertyValue, COMPONENT};

fn options(values: &[&str]) -> PropertyValue {
    PropertyValue::List(values.iter().map(|v| PropertyValue::from(*v)).collect())
}

fn sample(
    id: &str,
    name: &str,
    description: &str,
    properties: Vec<(&str, PropertyValue)>,
) -> ComponentSpec {
    ComponentSpec {
        id: id.to_string(),
        name: name.to_string(),
        component_type: COMPONENT.to_string(),
        properties: properties
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect::<PropertyBag>(),
        variants: None,
        description: Some(description.to_string()),
    }
}

/// Sample button, input and card specs for files without any components.
pub fn fallback_components() -> Vec<ComponentSpec> {
    vec![
        sample(
            "button-component",
            "Button",
            "Primary button component with multiple variants",
            vec![
                ("variant", options(&["primary", "secondary", "outline"])),
                ("size", options(&["sm", "md", "lg"])),
                ("disabled", "boolean".into()),
                ("text", "string".into()),
            ],
        ),
        sample(
            "input-component",
            "Input",
            "Input field component",
            vec![
                ("type", options(&["text", "email", "password"])),
                ("placeholder", "string".into()),
                ("disabled", "boolean".into()),
                ("required", "boolean".into()),
            ],
        ),
        sample(
            "card-component",
            "Card",
            "Card container component",
            vec![
                ("elevation", options(&["none", "sm", "md", "lg"])),
                ("padding", options(&["sm", "md", "lg"])),
                ("rounded", "boolean".into()),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn button_sample_serializes_with_option_lists() {
        let button = &fallback_components()[0];
        assert_eq!(
            serde_json::to_value(button).unwrap(),
            json!({
                "id": "button-component",
                "name": "Button",
                "type": "component",
                "properties": {
                    "variant": ["primary", "secondary", "outline"],
                    "size": ["sm", "md", "lg"],
                    "disabled": "boolean",
                    "text": "string"
                },
                "description": "Primary button component with multiple variants"
            })
        );
    }
}
