//! The fixed set of entities PolicyDesk manages and their schemas.

use crate::error::{SchemaError, SchemaResult};
use crate::schema::{CrossFieldRule, EntitySchema, FieldDescriptor};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifies one managed entity. The set is closed: adding an entity
/// means adding a variant and a schema, never a runtime registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKey {
    Customers,
    Plans,
    Policies,
}

impl EntityKey {
    /// All keys in display order.
    pub const ALL: [EntityKey; 3] = [EntityKey::Customers, EntityKey::Plans, EntityKey::Policies];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKey::Customers => "customers",
            EntityKey::Plans => "plans",
            EntityKey::Policies => "policies",
        }
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKey {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityKey::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SchemaError::UnknownEntity(s.to_string()))
    }
}

/// Static mapping from [`EntityKey`] to its [`EntitySchema`].
///
/// Every key always has a schema, so lookups by key cannot fail.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaRegistry {
    customers: EntitySchema,
    plans: EntitySchema,
    policies: EntitySchema,
}

impl SchemaRegistry {
    /// The customer, plan and policy schemas served by the backend.
    pub fn builtin() -> Self {
        Self {
            customers: customers_schema(),
            plans: plans_schema(),
            policies: policies_schema(),
        }
    }

    /// Builds a registry from explicit schemas, checking each one.
    pub fn from_schemas(
        schemas: impl IntoIterator<Item = (EntityKey, EntitySchema)>,
    ) -> SchemaResult<Self> {
        let (mut customers, mut plans, mut policies) = (None, None, None);
        for (key, schema) in schemas {
            schema.check()?;
            let slot = match key {
                EntityKey::Customers => &mut customers,
                EntityKey::Plans => &mut plans,
                EntityKey::Policies => &mut policies,
            };
            *slot = Some(schema);
        }

        let missing = |key: EntityKey| SchemaError::MissingSchema(key.to_string());
        Ok(Self {
            customers: customers.ok_or_else(|| missing(EntityKey::Customers))?,
            plans: plans.ok_or_else(|| missing(EntityKey::Plans))?,
            policies: policies.ok_or_else(|| missing(EntityKey::Policies))?,
        })
    }

    pub fn get(&self, key: EntityKey) -> &EntitySchema {
        match key {
            EntityKey::Customers => &self.customers,
            EntityKey::Plans => &self.plans,
            EntityKey::Policies => &self.policies,
        }
    }

    /// Schemas in display order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityKey, &EntitySchema)> {
        EntityKey::ALL.into_iter().map(move |key| (key, self.get(key)))
    }

    /// Finds the entity served by a backend collection.
    pub fn by_endpoint(&self, endpoint: &str) -> Option<(EntityKey, &EntitySchema)> {
        self.iter().find(|(_, schema)| schema.endpoint == endpoint)
    }

    /// Every endpoint referenced by a selectRef field of any schema,
    /// deduplicated, in display order.
    pub fn reference_endpoints(&self) -> Vec<&str> {
        let mut endpoints: Vec<&str> = Vec::new();
        for (_, schema) in self.iter() {
            for endpoint in schema.reference_endpoints() {
                if !endpoints.contains(&endpoint) {
                    endpoints.push(endpoint);
                }
            }
        }
        endpoints
    }

    /// Runs [`EntitySchema::check`] over every schema.
    pub fn check(&self) -> SchemaResult<()> {
        self.iter().try_for_each(|(_, schema)| schema.check())
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

fn customers_schema() -> EntitySchema {
    EntitySchema::new(
        "Customers",
        "clientes",
        vec![
            FieldDescriptor::text("nombres", "Full name")
                .required()
                .with_min_length(2),
            FieldDescriptor::text("identificacion", "Identification")
                .required()
                .with_pattern("^[0-9]{10,13}$", "Must have between 10 and 13 digits"),
            FieldDescriptor::email("email", "Email").required(),
            FieldDescriptor::text("telefono", "Phone")
                .required()
                .with_pattern("^[0-9]{10}$", "Must have 10 digits"),
        ],
    )
}

fn plans_schema() -> EntitySchema {
    EntitySchema::new(
        "Plans",
        "planes",
        vec![
            FieldDescriptor::text("nombre", "Name")
                .required()
                .with_min_length(3),
            FieldDescriptor::select(
                "tipo",
                "Type",
                &[("VIDA", "Life"), ("AUTO", "Auto"), ("SALUD", "Health")],
            )
            .required(),
            FieldDescriptor::number("primaBase", "Base premium", Some(0.0)).required(),
            FieldDescriptor::number("coberturaMax", "Maximum coverage", Some(0.0)).required(),
        ],
    )
}

fn policies_schema() -> EntitySchema {
    EntitySchema::new(
        "Policies",
        "polizas",
        vec![
            FieldDescriptor::text("numeroPoliza", "Policy number")
                .required()
                .with_min_length(3),
            FieldDescriptor::date("fechaInicio", "Start date").required(),
            FieldDescriptor::date("fechaFin", "End date").required(),
            FieldDescriptor::number("primaMensual", "Monthly premium", Some(0.0)).required(),
            FieldDescriptor::select(
                "estado",
                "Status",
                &[("ACTIVA", "Active"), ("CANCELADA", "Cancelled")],
            )
            .required(),
            FieldDescriptor::select_ref("clienteId", "Customer", "clientes", "nombres").required(),
            FieldDescriptor::select_ref("planSeguroId", "Insurance plan", "planes", "nombre")
                .required(),
        ],
    )
    .with_rule(CrossFieldRule::date_order(
        "fechaInicio",
        "fechaFin",
        "End date must be after start date",
    ))
}
