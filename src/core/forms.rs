//! Draft state and submission pipeline for create/edit forms.
//!
//! A draft holds display-formatted field values (masks applied on every
//! write), validates on submit with first-failure-wins ordering, and emits a
//! create or update payload with the masks stripped back off.

use crate::error::ValidationError;
use crate::utils::masks;
use crate::utils::validation;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Left blank on an edit form this field means "unchanged" and is omitted
/// from the update payload.
pub const PASSWORD_FIELD: &str = "password";

/// Display mask applied to a field on every write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldMask {
    None,
    Cpf,
    Cnpj,
    Phone,
}

impl FieldMask {
    fn apply(self, raw: &str) -> String {
        match self {
            FieldMask::None => raw.to_string(),
            FieldMask::Cpf => masks::mask_cpf(raw),
            FieldMask::Cnpj => masks::mask_cnpj(raw),
            FieldMask::Phone => masks::mask_phone(raw),
        }
    }

    /// Undo the display formatting before the value goes on the wire.
    fn strip(self, value: &str) -> String {
        match self {
            FieldMask::None => value.to_string(),
            _ => masks::unmask(value),
        }
    }
}

#[derive(Debug)]
struct FieldSpec {
    name: &'static str,
    mask: FieldMask,
    required: bool,
}

/// Field-shape rules checked after required-field presence.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    /// Unmasked value must have exactly `count` digits (skipped when blank).
    ExactDigits { field: &'static str, count: usize },
    /// Simple `text@text.text` shape (skipped when blank).
    Email { field: &'static str },
}

type BusinessRule = Box<dyn Fn(&FormDraft) -> Result<(), ValidationError> + Send + Sync>;

/// Outcome of a successful submit: which mutation to issue, chosen by the
/// presence of a record id.
#[derive(Debug, Clone, PartialEq)]
pub enum FormSubmit {
    Create(Value),
    Update(u32, Value),
}

impl FormSubmit {
    pub fn payload(&self) -> &Value {
        match self {
            FormSubmit::Create(payload) => payload,
            FormSubmit::Update(_, payload) => payload,
        }
    }
}

pub struct FormDraft {
    id: Option<u32>,
    specs: Vec<FieldSpec>,
    values: BTreeMap<&'static str, String>,
    rules: Vec<Rule>,
    business_rule: Option<BusinessRule>,
    extra: Map<String, Value>,
}

impl FormDraft {
    /// Draft for a new record.
    pub fn create() -> Self {
        Self {
            id: None,
            specs: Vec::new(),
            values: BTreeMap::new(),
            rules: Vec::new(),
            business_rule: None,
            extra: Map::new(),
        }
    }

    /// Draft editing an existing record.
    pub fn edit(id: u32) -> Self {
        let mut draft = Self::create();
        draft.id = Some(id);
        draft
    }

    pub fn field(mut self, name: &'static str, mask: FieldMask, required: bool) -> Self {
        self.specs.push(FieldSpec {
            name,
            mask,
            required,
        });
        self
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Caller-supplied rule checked after all shape rules pass.
    pub fn business_rule<F>(mut self, rule: F) -> Self
    where
        F: Fn(&FormDraft) -> Result<(), ValidationError> + Send + Sync + 'static,
    {
        self.business_rule = Some(Box::new(rule));
        self
    }

    pub fn is_update(&self) -> bool {
        self.id.is_some()
    }

    /// Store a field value with its registered mask applied. Writes to
    /// unregistered fields are ignored.
    pub fn set(&mut self, name: &str, value: &str) {
        if let Some(spec) = self.specs.iter().find(|spec| spec.name == name) {
            self.values.insert(spec.name, spec.mask.apply(value));
        }
    }

    /// Non-string payload fields (ids, flags) that bypass masking and
    /// validation.
    pub fn set_extra(&mut self, name: &str, value: Value) {
        self.extra.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }

    /// Validate in order (required fields, then shape rules, then the
    /// business rule; first failure wins) and build the mutation payload.
    pub fn submit(&self) -> Result<FormSubmit, ValidationError> {
        let missing: Vec<String> = self
            .specs
            .iter()
            .filter(|spec| spec.required && self.get(spec.name).trim().is_empty())
            .map(|spec| spec.name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ValidationError::RequiredFields { fields: missing });
        }

        for rule in &self.rules {
            match rule {
                Rule::ExactDigits { field, count } => {
                    let digits = masks::unmask(self.get(field));
                    if !digits.is_empty() && digits.len() != *count {
                        return Err(ValidationError::InvalidField {
                            field: field.to_string(),
                            message: format!("must have exactly {} digits", count),
                        });
                    }
                }
                Rule::Email { field } => {
                    let value = self.get(field);
                    if !value.is_empty() && !validation::is_valid_email(value) {
                        return Err(ValidationError::InvalidField {
                            field: field.to_string(),
                            message: "invalid email format".to_string(),
                        });
                    }
                }
            }
        }

        if let Some(rule) = &self.business_rule {
            rule(self)?;
        }

        let mut payload = Map::new();
        for spec in &self.specs {
            let value = self.get(spec.name);
            if spec.name == PASSWORD_FIELD && value.is_empty() && self.is_update() {
                continue;
            }
            payload.insert(
                spec.name.to_string(),
                Value::String(spec.mask.strip(value)),
            );
        }
        for (name, value) in &self.extra {
            payload.insert(name.clone(), value.clone());
        }

        let payload = Value::Object(payload);
        Ok(match self.id {
            Some(id) => FormSubmit::Update(id, payload),
            None => FormSubmit::Create(payload),
        })
    }
}
