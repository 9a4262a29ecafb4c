use super::{
    BelongsTo, Field, FieldId, FieldPrimitive, HasMany, HasOne, ManyToMany, Model, ModelId, Schema,
};
use crate::{Error, Result};

/// Builds a [`Schema`], resolving relation targets by model name.
///
/// Relations reference their targets by name while building; `build`
/// resolves every name to a [`ModelId`] and fails on the first dangling
/// reference. This is the single point where relation existence is
/// verified.
#[derive(Default)]
pub struct Builder {
    models: Vec<ModelBuilder>,
}

pub struct ModelBuilder {
    name: String,
    table: Option<String>,
    primary_key: String,
    fields: Vec<FieldSpec>,
}

struct FieldSpec {
    name: String,
    nullable: bool,
    ty: FieldSpecTy,
}

enum FieldSpecTy {
    Primitive,
    BelongsTo {
        target: String,
        foreign_key: String,
    },
    HasOne {
        target: String,
        foreign_key: String,
    },
    HasMany {
        target: String,
        foreign_key: String,
    },
    ManyToMany {
        target: String,
        pivot_table: String,
        owner_key: String,
        related_key: String,
    },
}

impl Builder {
    pub fn model(mut self, name: &str, build: impl FnOnce(&mut ModelBuilder)) -> Self {
        let mut model = ModelBuilder {
            name: name.to_string(),
            table: None,
            primary_key: "id".to_string(),
            fields: vec![],
        };
        build(&mut model);
        self.models.push(model);
        self
    }

    pub fn build(self) -> Result<Schema> {
        let resolve = |target: &str| -> Result<ModelId> {
            self.models
                .iter()
                .position(|model| model.name == target)
                .map(ModelId)
                .ok_or_else(|| Error::unknown_model(target))
        };

        let mut models = vec![];

        for (index, builder) in self.models.iter().enumerate() {
            let model_id = ModelId(index);
            let mut fields = vec![];

            for (field_index, spec) in builder.fields.iter().enumerate() {
                let ty = match &spec.ty {
                    FieldSpecTy::Primitive => FieldPrimitive {
                        column: spec.name.clone(),
                    }
                    .into(),
                    FieldSpecTy::BelongsTo {
                        target,
                        foreign_key,
                    } => BelongsTo {
                        target: resolve(target)?,
                        foreign_key: foreign_key.clone(),
                    }
                    .into(),
                    FieldSpecTy::HasOne {
                        target,
                        foreign_key,
                    } => HasOne {
                        target: resolve(target)?,
                        foreign_key: foreign_key.clone(),
                    }
                    .into(),
                    FieldSpecTy::HasMany {
                        target,
                        foreign_key,
                    } => HasMany {
                        target: resolve(target)?,
                        foreign_key: foreign_key.clone(),
                    }
                    .into(),
                    FieldSpecTy::ManyToMany {
                        target,
                        pivot_table,
                        owner_key,
                        related_key,
                    } => ManyToMany {
                        target: resolve(target)?,
                        pivot_table: pivot_table.clone(),
                        owner_key: owner_key.clone(),
                        related_key: related_key.clone(),
                    }
                    .into(),
                };

                fields.push(Field {
                    id: FieldId {
                        model: model_id,
                        index: field_index,
                    },
                    name: spec.name.clone(),
                    ty,
                    nullable: spec.nullable,
                });
            }

            models.push(Model {
                id: model_id,
                name: builder.name.clone(),
                table: builder.table.clone().unwrap_or_else(|| builder.name.clone()),
                primary_key: builder.primary_key.clone(),
                fields,
            });
        }

        Ok(Schema { models })
    }
}

impl ModelBuilder {
    pub fn table(&mut self, table: &str) -> &mut Self {
        self.table = Some(table.to_string());
        self
    }

    pub fn primary_key(&mut self, column: &str) -> &mut Self {
        self.primary_key = column.to_string();
        self
    }

    /// A plain column.
    pub fn field(&mut self, name: &str) -> &mut Self {
        self.push(name, FieldSpecTy::Primitive)
    }

    /// The owning side of a 1:1; `foreign_key` lives on this model's row.
    pub fn belongs_to(&mut self, name: &str, target: &str, foreign_key: &str) -> &mut Self {
        self.push(
            name,
            FieldSpecTy::BelongsTo {
                target: target.to_string(),
                foreign_key: foreign_key.to_string(),
            },
        )
    }

    /// The owned side of a 1:1; `foreign_key` lives on the target's row.
    pub fn has_one(&mut self, name: &str, target: &str, foreign_key: &str) -> &mut Self {
        self.push(
            name,
            FieldSpecTy::HasOne {
                target: target.to_string(),
                foreign_key: foreign_key.to_string(),
            },
        )
    }

    pub fn has_many(&mut self, name: &str, target: &str, foreign_key: &str) -> &mut Self {
        self.push(
            name,
            FieldSpecTy::HasMany {
                target: target.to_string(),
                foreign_key: foreign_key.to_string(),
            },
        )
    }

    pub fn many_to_many(
        &mut self,
        name: &str,
        target: &str,
        pivot_table: &str,
        owner_key: &str,
        related_key: &str,
    ) -> &mut Self {
        self.push(
            name,
            FieldSpecTy::ManyToMany {
                target: target.to_string(),
                pivot_table: pivot_table.to_string(),
                owner_key: owner_key.to_string(),
                related_key: related_key.to_string(),
            },
        )
    }

    pub fn nullable(&mut self) -> &mut Self {
        if let Some(last) = self.fields.last_mut() {
            last.nullable = true;
        }
        self
    }

    fn push(&mut self, name: &str, ty: FieldSpecTy) -> &mut Self {
        self.fields.push(FieldSpec {
            name: name.to_string(),
            nullable: false,
            ty,
        });
        self
    }
}
