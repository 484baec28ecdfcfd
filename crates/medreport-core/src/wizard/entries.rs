//! Test entries collected by the second wizard step.

use super::{WizardError, WizardResult};
use crate::models::{Attachment, TestDetail};
use crate::validation::validate_test_detail;

/// Entry being edited, with where it came from.
#[derive(Debug, Clone)]
struct Editing {
    position: usize,
    original: TestDetail,
}

/// Committed test entries plus the entry form's current draft.
///
/// Editing moves an entry out of the committed list into the draft; it only
/// counts again once re-submitted (or the edit is cancelled).
#[derive(Debug, Clone)]
pub struct TestEntries {
    committed: Vec<TestDetail>,
    draft: TestDetail,
    editing: Option<Editing>,
}

impl Default for TestEntries {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEntries {
    pub fn new() -> Self {
        Self {
            committed: Vec::new(),
            draft: blank_draft(),
            editing: None,
        }
    }

    /// Committed entries in entry order.
    pub fn committed(&self) -> &[TestDetail] {
        &self.committed
    }

    pub fn draft(&self) -> &TestDetail {
        &self.draft
    }

    /// Replace the draft's fields. Attachments already on the draft are kept
    /// when `detail` carries none.
    pub fn set_draft(&mut self, mut detail: TestDetail) {
        if detail.attachments.is_none() {
            detail.attachments = self.draft.attachments.take();
        }
        self.draft = detail;
    }

    pub fn add_attachment(&mut self, attachment: Attachment) {
        self.draft
            .attachments
            .get_or_insert_with(Vec::new)
            .push(attachment);
    }

    pub fn remove_attachment(&mut self, index: usize) -> WizardResult<Attachment> {
        let attachments = self
            .draft
            .attachments
            .as_mut()
            .filter(|a| index < a.len())
            .ok_or(WizardError::InvalidEntryIndex(index))?;
        let removed = attachments.remove(index);
        if attachments.is_empty() {
            self.draft.attachments = None;
        }
        Ok(removed)
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Validate the draft and commit it, back in its old position when it
    /// was being edited. Returns the committed position.
    pub fn submit(&mut self) -> WizardResult<usize> {
        validate_test_detail(&self.draft)?;

        let detail = std::mem::replace(&mut self.draft, blank_draft()).normalized();
        let position = match self.editing.take() {
            Some(editing) => editing.position.min(self.committed.len()),
            None => self.committed.len(),
        };
        self.committed.insert(position, detail);

        tracing::debug!(position, count = self.committed.len(), "Committed test entry");
        Ok(position)
    }

    /// Load committed entry `index` into the draft. An edit already in
    /// progress is cancelled first; `index` refers to the list as it was
    /// before this call.
    pub fn begin_edit(&mut self, index: usize) -> WizardResult<&TestDetail> {
        if index >= self.committed.len() {
            return Err(WizardError::InvalidEntryIndex(index));
        }

        let mut index = index;
        if let Some(previous) = self.editing.as_ref().map(|e| e.position) {
            self.cancel_edit()?;
            if index >= previous {
                index += 1;
            }
        }

        let detail = self.committed.remove(index);
        self.draft = detail.clone();
        self.editing = Some(Editing {
            position: index,
            original: detail,
        });
        Ok(&self.draft)
    }

    /// Put the entry being edited back unchanged and clear the draft.
    pub fn cancel_edit(&mut self) -> WizardResult<()> {
        let editing = self.editing.take().ok_or(WizardError::NotEditing)?;
        let position = editing.position.min(self.committed.len());
        self.committed.insert(position, editing.original);
        self.draft = blank_draft();
        Ok(())
    }

    /// Remove committed entry `index`.
    pub fn remove(&mut self, index: usize) -> WizardResult<TestDetail> {
        if index >= self.committed.len() {
            return Err(WizardError::InvalidEntryIndex(index));
        }
        if let Some(editing) = self.editing.as_mut() {
            if index < editing.position {
                editing.position -= 1;
            }
        }
        Ok(self.committed.remove(index))
    }
}

fn blank_draft() -> TestDetail {
    TestDetail {
        test_date: chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string(),
        ..Default::default()
    }
}
