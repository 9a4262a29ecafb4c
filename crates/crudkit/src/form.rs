use crate::{engine::fields, FieldDef, RelationKind};

use crudkit_core::{schema::ModelId, Error, Result, Schema};

/// A field-definition list validated against the model schema for one
/// root model.
///
/// Validation resolves every entity path, infers or checks relation
/// kinds, and rejects combinations the create pathway cannot commit.
/// After construction no relation lookup can fail at create time.
#[derive(Debug)]
pub struct Form {
    root: ModelId,
    fields: Vec<FieldDef>,
    relations: Vec<ResolvedRelation>,
}

/// A relation field with its entity path resolved against the schema.
#[derive(Debug, Clone)]
pub(crate) struct ResolvedRelation {
    pub(crate) def: FieldDef,

    /// Dotted payload key the submitted value lives under
    pub(crate) attribute: String,

    /// Canonical relation path (attribute tail stripped)
    pub(crate) entity: String,

    pub(crate) kind: RelationKind,

    /// True when the canonical path sits inside another relation
    pub(crate) nested: bool,
}

impl Form {
    pub fn new(schema: &Schema, root: ModelId, fields: Vec<FieldDef>) -> Result<Self> {
        let mut relations = vec![];

        for def in fields::relation_fields(&fields) {
            let attribute = fields::dotted_name(&def.name);
            let entity = fields::only_relation_entity(schema, root, def)?;
            let field = fields::resolve_relation(schema, root, &entity)?;

            let kind = match def.relation {
                Some(kind) => {
                    if !kind.matches(&field.ty) {
                        return Err(Error::relation_kind_mismatch(
                            &def.name,
                            kind.name(),
                            field.ty.kind_name(),
                        ));
                    }
                    kind
                }
                None => RelationKind::of(&field.ty)
                    .ok_or_else(|| Error::unknown_relation(&schema.model(root).name, &entity))?,
            };

            let nested = entity.contains('.');

            if def.pivot {
                if !kind.is_pivot_capable() {
                    return Err(Error::relation_kind_mismatch(
                        &def.name,
                        "a many-to-many-capable",
                        kind.name(),
                    ));
                }
                if nested {
                    return Err(Error::relation_kind_mismatch(
                        &def.name,
                        "a top-level many-to-many",
                        "a nested relation",
                    ));
                }
            } else if !kind.is_belongs_to() || nested {
                // This field lands in the relation tree, which only commits
                // one-to-one chains. Reject anything else up front instead
                // of ignoring it at commit time.
                let terminal_ok = kind.is_has_one() || (kind.is_belongs_to() && nested);
                if !terminal_ok {
                    return Err(Error::unsupported_relation(&def.name, kind.name()));
                }

                // Every hop above the terminal relation must itself be
                // one-to-one for parent-before-child commits to work.
                let segments: Vec<&str> = entity.split('.').collect();
                for depth in 1..segments.len() {
                    let prefix = segments[..depth].join(".");
                    let hop = fields::resolve_relation(schema, root, &prefix)?;
                    if !hop.ty.is_has_one() {
                        return Err(Error::unsupported_relation(&prefix, hop.ty.kind_name()));
                    }
                }
            }

            relations.push(ResolvedRelation {
                def: def.clone(),
                attribute,
                entity,
                kind,
                nested,
            });
        }

        Ok(Self {
            root,
            fields,
            relations,
        })
    }

    pub fn root(&self) -> ModelId {
        self.root
    }

    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    /// All resolved relation fields, encounter order preserved.
    pub(crate) fn relation_fields(&self) -> &[ResolvedRelation] {
        &self.relations
    }

    /// Relation fields committed through a pivot table.
    pub(crate) fn pivot_relation_fields(&self) -> impl Iterator<Item = &ResolvedRelation> {
        self.relations.iter().filter(|rel| rel.def.pivot)
    }
}
