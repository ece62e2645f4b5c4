//! Triple emission
//!
//! A subject node produces its terms for the cursor's scope, then emits:
//! 1. `rdf:type` statements, types in declaration order
//! 2. property statements, properties in declaration order
//!
//! Each property's object node is evaluated under a cursor derived from the
//! subject's, so statements of a nested subject reach the sink before the
//! parent's statement that links to it. Subjects and objects combine as a
//! full cross product.

use super::node::Node;
use super::subject::SubjectMappings;
use crate::error::TransformResult;
use crate::materialize::{EvalContext, RdfTerm};
use crate::record::{Record, RecordModel};
use crate::sink::Triple;
use crate::vocab::rdf;

impl Node {
    /// Evaluate this node as a root for one row
    ///
    /// Returns the subject terms produced; triples go to the context's sink.
    pub fn create_statements_for_row(
        &self,
        ctx: &mut EvalContext<'_>,
        row: usize,
    ) -> TransformResult<Vec<RdfTerm>> {
        let mut cursor = RecordModel::root_row(row);
        let terms = self.create_statements(ctx, &mut cursor);
        cursor.clear();
        terms
    }

    /// Evaluate this node as a root for one record
    pub fn create_statements_for_record(
        &self,
        ctx: &mut EvalContext<'_>,
        record: Record,
    ) -> TransformResult<Vec<RdfTerm>> {
        let mut cursor = RecordModel::root_record(record);
        let terms = self.create_statements(ctx, &mut cursor);
        cursor.clear();
        terms
    }

    /// Terms of this node when used as the object of a property
    ///
    /// Literal nodes only produce; resource nodes also emit their own
    /// statements.
    pub(crate) fn create_objects(
        &self,
        ctx: &mut EvalContext<'_>,
        parent: &RecordModel,
    ) -> TransformResult<Vec<RdfTerm>> {
        let mut cursor = RecordModel::for_object(parent);
        if !cursor.is_set() {
            return Ok(Vec::new());
        }
        self.create_statements(ctx, &mut cursor)
    }

    fn create_statements(
        &self,
        ctx: &mut EvalContext<'_>,
        cursor: &mut RecordModel,
    ) -> TransformResult<Vec<RdfTerm>> {
        let mappings = self.subject_mappings();

        if cursor.is_record_per_row() {
            let mut all = Vec::new();
            while cursor.row_next() {
                let terms = self.produce_row(ctx, cursor.row());
                if terms.is_empty() {
                    continue;
                }
                if let Some(mappings) = mappings {
                    mappings.emit(ctx, &terms, cursor)?;
                }
                all.extend(terms);
            }
            return Ok(all);
        }

        let terms = self.produce(ctx, cursor);
        if !terms.is_empty() {
            if let Some(mappings) = mappings {
                mappings.emit(ctx, &terms, cursor)?;
            }
        }
        Ok(terms)
    }
}

impl SubjectMappings {
    fn emit(
        &self,
        ctx: &mut EvalContext<'_>,
        subjects: &[RdfTerm],
        cursor: &RecordModel,
    ) -> TransformResult<()> {
        let mut types = Vec::with_capacity(self.types.len());
        for rdf_type in &self.types {
            match ctx.resolve_resource(rdf_type.prefix.as_deref(), &rdf_type.path) {
                Ok(Some(iri)) => types.push(iri),
                Ok(None) => {}
                Err(e) => tracing::error!(
                    prefix = ?rdf_type.prefix,
                    path = %rdf_type.path,
                    error = %e,
                    "Skipping type with unusable IRI"
                ),
            }
        }
        for subject in subjects {
            for type_iri in &types {
                ctx.emit(Triple::new(
                    subject.clone(),
                    rdf::TYPE,
                    RdfTerm::iri(type_iri.as_str()),
                ))?;
            }
        }

        for property in &self.properties {
            let Some(object) = property.object.as_deref() else {
                continue;
            };
            if property.is_blank() {
                continue;
            }

            let objects = object.create_objects(ctx, cursor)?;
            if objects.is_empty() {
                continue;
            }

            let predicate = match ctx.resolve_resource(property.prefix.as_deref(), &property.path) {
                Ok(Some(iri)) => iri,
                Ok(None) => continue,
                Err(e) => {
                    tracing::error!(
                        prefix = ?property.prefix,
                        path = %property.path,
                        error = %e,
                        "Skipping property with unusable IRI"
                    );
                    continue;
                }
            };

            for subject in subjects {
                for term in &objects {
                    ctx.emit(Triple::new(subject.clone(), predicate.as_str(), term.clone()))?;
                }
            }
        }
        Ok(())
    }
}
