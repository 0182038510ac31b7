//! JSON Schema contract for emitted descriptor lists.
//!
//! The bundled schema lives at `schema/descriptor.schema.json`; callers can
//! also compile a schema from disk. Validation collects every violation into
//! one error so golden-file refreshes report all problems at once.

use anyhow::{Context, Result, anyhow, bail};
use jsonschema::JSONSchema;
use serde_json::Value;
use std::fs::File;
use std::path::Path;

const BUNDLED_SCHEMA: &str = include_str!("../schema/descriptor.schema.json");

/// Compiled descriptor-list schema.
pub struct DescriptorSchema {
    compiled: JSONSchema,
}

impl DescriptorSchema {
    /// Compile the schema shipped with the crate.
    pub fn bundled() -> Result<Self> {
        let schema: Value =
            serde_json::from_str(BUNDLED_SCHEMA).context("parsing bundled descriptor schema")?;
        Self::compile(&schema, "bundled descriptor schema")
    }

    /// Parse and compile a schema file.
    pub fn load(path: &Path) -> Result<Self> {
        let schema: Value = serde_json::from_reader(
            File::open(path).with_context(|| format!("opening schema {}", path.display()))?,
        )
        .with_context(|| format!("parsing schema {}", path.display()))?;
        Self::compile(&schema, &path.display().to_string())
    }

    fn compile(schema: &Value, label: &str) -> Result<Self> {
        let compiled = JSONSchema::compile(schema)
            .map_err(|err| anyhow!("compiling {label}: {err}"))?;
        Ok(Self { compiled })
    }

    /// Validate a descriptor list (already serialized to JSON).
    pub fn validate(&self, instance: &Value) -> Result<()> {
        if let Err(errors) = self.compiled.validate(instance) {
            let details = errors
                .map(|err| format!("{}: {}", err.instance_path, err))
                .collect::<Vec<_>>()
                .join("\n");
            bail!("descriptor list failed schema validation:\n{}", details);
        }
        Ok(())
    }
}
