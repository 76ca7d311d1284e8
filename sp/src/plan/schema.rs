//! Response schema descriptors
//!
//! A small typed mirror of the OpenAPI subset the generateContent endpoint
//! accepts as `responseSchema`. Properties keep insertion order so the model
//! sees fields in the order the prompt describes them.

use serde::Serialize;
use tracing::debug;

/// JSON type of a schema node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SchemaType {
    Object,
    Array,
    String,
    Integer,
}

/// Structural contract the model's JSON response must follow
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaDescriptor {
    #[serde(rename = "type")]
    pub schema_type: SchemaType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_properties")]
    pub properties: Option<Vec<(String, SchemaDescriptor)>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaDescriptor>>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
}

fn serialize_properties<S>(props: &Option<Vec<(String, SchemaDescriptor)>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    use serde::ser::SerializeMap;

    let props = props.as_deref().unwrap_or_default();
    let mut map = serializer.serialize_map(Some(props.len()))?;
    for (name, schema) in props {
        map.serialize_entry(name, schema)?;
    }
    map.end()
}

impl SchemaDescriptor {
    fn leaf(schema_type: SchemaType) -> Self {
        Self {
            schema_type,
            description: None,
            properties: None,
            items: None,
            required: Vec::new(),
        }
    }

    pub fn string() -> Self {
        Self::leaf(SchemaType::String)
    }

    pub fn integer() -> Self {
        Self::leaf(SchemaType::Integer)
    }

    pub fn object() -> Self {
        Self {
            properties: Some(Vec::new()),
            ..Self::leaf(SchemaType::Object)
        }
    }

    pub fn array(items: SchemaDescriptor) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::leaf(SchemaType::Array)
        }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add a property to an object schema, optionally marking it required
    pub fn property(mut self, name: impl Into<String>, schema: SchemaDescriptor, required: bool) -> Self {
        let name = name.into();
        if required {
            self.required.push(name.clone());
        }
        self.properties.get_or_insert_with(Vec::new).push((name, schema));
        self
    }

    /// Render in the wire format expected by the model API
    pub fn to_json(&self) -> serde_json::Value {
        debug!(schema_type = ?self.schema_type, "SchemaDescriptor::to_json: called");
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

/// Schema for a day-count recommendation: `{ days: integer }`
pub fn days_schema() -> SchemaDescriptor {
    SchemaDescriptor::object().property(
        "days",
        SchemaDescriptor::integer().describe(
            "The recommended number of days to learn the basics of the skill, typically between 3 and 14.",
        ),
        true,
    )
}

/// Schema for a full plan: an array of `{ day, goal, concepts, task }`
pub fn plan_schema() -> SchemaDescriptor {
    let day = SchemaDescriptor::object()
        .property(
            "day",
            SchemaDescriptor::integer().describe("The day number of the plan (e.g., 1, 2, 3...)."),
            true,
        )
        .property(
            "goal",
            SchemaDescriptor::string().describe("A clear, concise objective for the day."),
            true,
        )
        .property(
            "concepts",
            SchemaDescriptor::array(SchemaDescriptor::string()).describe("An array of 2-3 core topics to learn."),
            true,
        )
        .property(
            "task",
            SchemaDescriptor::string().describe("A small, concrete exercise to practice the skill."),
            true,
        );

    SchemaDescriptor::array(day)
}
