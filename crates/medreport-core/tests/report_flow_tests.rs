//! End-to-end tests: wizard submission through to the rendered report.

use medreport_core::config::Config;
use medreport_core::models::{is_valid_patient_id, Attachment, PatientInfo, PatientRecord, TestDetail};
use medreport_core::navigation::Route;
use medreport_core::presentation::{CodeImageState, ReportPresentation};
use medreport_core::report::render_report_markup;
use medreport_core::storage::{MemoryStore, RecordStore, StorageError};
use medreport_core::wizard::{FormWizard, WizardError, WizardStep};
use proptest::prelude::*;

fn jane_doe() -> PatientInfo {
    PatientInfo {
        first_name: "Jane".to_string(),
        last_name: "Doe".to_string(),
        age: 34,
        gender: "female".to_string(),
        contact: "5551234567".to_string(),
        email: "jane@x.com".to_string(),
        address: "1 Elm St".to_string(),
    }
}

fn cbc() -> TestDetail {
    TestDetail {
        test_name: "CBC".to_string(),
        test_type: "Blood Test".to_string(),
        test_date: "2024-01-01".to_string(),
        test_result: "Normal".to_string(),
        ..Default::default()
    }
}

fn fill_wizard(tests: &[TestDetail]) -> FormWizard {
    let mut wizard = FormWizard::new();
    wizard.submit_patient_info(jane_doe()).unwrap();
    for test in tests {
        let entries = wizard.entries_mut().unwrap();
        entries.set_draft(test.clone());
        entries.submit().unwrap();
    }
    wizard
}

#[test]
fn test_wizard_to_report() {
    let mut store = RecordStore::new(MemoryStore::new());
    let mut wizard = fill_wizard(&[cbc()]);

    let finalized = wizard.finalize(&mut store).unwrap();
    let id = finalized.record.id.clone();
    assert!(is_valid_patient_id(&id));
    assert_eq!(finalized.next, Route::GeneratedReport(id.clone()));
    assert_eq!(wizard.step(), WizardStep::CollectingPatientInfo);

    let stored = store.get_by_id(&id).unwrap().unwrap();
    assert_eq!(stored, finalized.record);

    let markup = render_report_markup(&stored);
    assert!(markup.contains("Jane Doe"));
    assert!(markup.contains("CBC"));
    assert!(markup.contains("Normal"));
    assert!(markup.contains("1/1/2024"));
    assert!(!markup.contains("Normal Range"));
    assert!(!markup.contains("attachments-section"));
}

#[test]
fn test_presentation_after_finalize() {
    let mut store = RecordStore::new(MemoryStore::new());
    let mut wizard = fill_wizard(&[cbc()]);
    let id = wizard.finalize(&mut store).unwrap().record.id;

    let config = Config::default();
    let presentation = ReportPresentation::load(&store, &id, &config);
    let view = presentation.view().expect("record should load");

    assert_eq!(view.report_url(), config.report_url(&id));
    assert!(view.print_document().contains("window.print()"));
    assert_eq!(view.code_image().state(), CodeImageState::Loading);
    assert!(view.download().file_name.contains(&id));
}

#[test]
fn test_unknown_id_is_not_found() {
    let store = RecordStore::new(MemoryStore::new());
    let presentation = ReportPresentation::load(&store, "MR-none-000000", &Config::default());

    match presentation {
        ReportPresentation::NotFound { patient_id, home } => {
            assert_eq!(patient_id, "MR-none-000000");
            assert_eq!(home, Route::Home);
        }
        ReportPresentation::Loaded(_) => panic!("expected not found"),
    }
}

#[test]
fn test_multiple_reports_listed_in_save_order() {
    let mut store = RecordStore::new(MemoryStore::new());

    let first = fill_wizard(&[cbc()]).finalize(&mut store).unwrap().record;
    let mut lipid = cbc();
    lipid.test_name = "Lipid Panel".to_string();
    lipid.normal_range = Some("< 200 mg/dL".to_string());
    let second = fill_wizard(&[cbc(), lipid])
        .finalize(&mut store)
        .unwrap()
        .record;

    let all = store.get_all();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, first.id);
    assert_eq!(all[1].id, second.id);
    assert_eq!(all[1].test_details.len(), 2);

    let markup = render_report_markup(&all[1]);
    assert!(markup.contains("Normal Range"));
    assert!(markup.contains("&lt; 200 mg/dL"));
}

#[test]
fn test_attachment_carried_into_report() {
    let mut store = RecordStore::new(MemoryStore::new());
    let mut wizard = FormWizard::new();
    wizard.submit_patient_info(jane_doe()).unwrap();

    let entries = wizard.entries_mut().unwrap();
    entries.set_draft(cbc());
    entries.add_attachment(Attachment::from_bytes("scan.png", "image/png", &[0x89, 0x50]));
    entries.add_attachment(Attachment::from_bytes("lab.pdf", "application/pdf", b"%PDF"));
    entries.submit().unwrap();

    let record = wizard.finalize(&mut store).unwrap().record;
    let markup = render_report_markup(&record);
    assert!(markup.contains("attachments-section"));
    assert!(markup.contains("data:image/png;base64,"));
    assert!(markup.contains("PDF File"));
}

#[test]
fn test_failed_save_keeps_draft() {
    let mut store = RecordStore::new(MemoryStore::with_quota(64));
    let mut wizard = fill_wizard(&[cbc()]);

    let err = wizard.finalize(&mut store).unwrap_err();
    assert!(matches!(
        err,
        WizardError::Storage(StorageError::QuotaExceeded { .. })
    ));
    assert_eq!(wizard.step(), WizardStep::CollectingTestDetails);
    assert_eq!(wizard.entries().committed().len(), 1);
    assert!(store.get_all().is_empty());
}

proptest! {
    #[test]
    fn prop_render_is_deterministic(
        first in "[A-Za-z<>&\"' ]{2,20}",
        result in "[A-Za-z0-9<>&\" ]{1,30}",
    ) {
        let mut info = jane_doe();
        info.first_name = first;
        let mut test = cbc();
        test.test_result = result;

        let record = PatientRecord::assemble("MR-abcd-EF1234".to_string(), info, vec![test]);
        let a = render_report_markup(&record);
        let b = render_report_markup(&record);
        prop_assert_eq!(&a, &b);
        prop_assert!(!a.contains("<script"));
        prop_assert_eq!(a.matches("class=\"test-result\"").count(), 1);
    }
}
