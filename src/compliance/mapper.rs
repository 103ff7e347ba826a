// file: src/compliance/mapper.rs
// description: finding to ISO 27001 control mapping against the scaffold
// reference: case-insensitive keyword and category matching

use crate::compliance::scaffold::ControlScaffold;
use crate::models::ClassifiedFinding;
use std::collections::BTreeSet;

/// Maps classified findings to the scaffold controls covering them. A
/// finding may match several controls; the empty set is a valid result and
/// propagates downstream as "Unmapped".
pub struct ControlMapper<'a> {
    scaffold: &'a ControlScaffold,
}

impl<'a> ControlMapper<'a> {
    pub fn new(scaffold: &'a ControlScaffold) -> Self {
        Self { scaffold }
    }

    pub fn map(&self, classified: &ClassifiedFinding) -> BTreeSet<String> {
        let finding = &classified.finding;
        let haystack = format!("{} {}", finding.detail, finding.asset).to_lowercase();

        let mut control_ids = BTreeSet::new();
        for control in self.scaffold.controls() {
            let category_match = control.categories.contains(&finding.category);
            let keyword_match = control
                .keywords
                .iter()
                .any(|keyword| haystack.contains(keyword.as_str()));

            if category_match || keyword_match {
                control_ids.insert(control.control_id.clone());
            }
        }

        control_ids
    }
}
