//! Code-image panel of the report screen.

use medreport_codeimage::{
    render_svg, share_or_copy, Clipboard, CodeImageRequest, CodeImageSettings, ShareOutcome,
    SharePayload, ShareTarget,
};
#[cfg(feature = "fetch")]
use medreport_codeimage::{CodeImageError, CodeImageResult};

/// Loading state of the panel's image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeImageState {
    /// Request issued, image not yet shown. A request that never completes
    /// stays here.
    Loading,
    Ready,
    /// The image failed to load
    Broken,
}

/// The scannable code pointing at the current report.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeImagePanel {
    patient_id: String,
    report_url: String,
    request: Option<CodeImageRequest>,
    state: CodeImageState,
}

impl CodeImagePanel {
    pub fn new(patient_id: &str, report_url: &str, settings: CodeImageSettings) -> Self {
        let request = match CodeImageRequest::new(report_url, settings) {
            Ok(request) => Some(request),
            Err(e) => {
                tracing::error!(patient_id, "Error generating QR code: {e}");
                None
            }
        };
        let state = if request.is_some() {
            CodeImageState::Loading
        } else {
            CodeImageState::Broken
        };

        Self {
            patient_id: patient_id.to_string(),
            report_url: report_url.to_string(),
            request,
            state,
        }
    }

    pub fn state(&self) -> CodeImageState {
        self.state
    }

    /// URL of the image on the external endpoint.
    pub fn image_url(&self) -> Option<String> {
        self.request.as_ref().map(CodeImageRequest::url)
    }

    pub fn mark_loaded(&mut self) {
        self.state = CodeImageState::Ready;
    }

    pub fn mark_failed(&mut self) {
        tracing::warn!(patient_id = %self.patient_id, "Code image failed to load");
        self.state = CodeImageState::Broken;
    }

    /// Fetch the image from the endpoint, marking the panel loaded or broken.
    #[cfg(feature = "fetch")]
    pub fn load_image(&mut self) -> CodeImageResult<Vec<u8>> {
        let Some(request) = &self.request else {
            return Err(CodeImageError::EmptyAddress);
        };
        match medreport_codeimage::fetch::fetch(request) {
            Ok(bytes) => {
                self.mark_loaded();
                Ok(bytes)
            }
            Err(e) => {
                self.mark_failed();
                Err(e)
            }
        }
    }

    /// Locally rendered SVG for when the endpoint is unreachable.
    pub fn fallback_svg(&self) -> Option<String> {
        let size = self.request.as_ref()?.settings.size;
        render_svg(&self.report_url, size)
            .map_err(|e| tracing::warn!("Fallback code render failed: {e}"))
            .ok()
    }

    /// `medical-report-qr-<id>.png`
    pub fn download_file_name(&self) -> String {
        format!("medical-report-qr-{}.png", self.patient_id)
    }

    pub fn share_payload(&self) -> SharePayload {
        SharePayload::for_report(&self.patient_id, &self.report_url)
    }

    /// Share through the host, or copy the report address.
    pub fn share(&self, target: Option<&dyn ShareTarget>, clipboard: &dyn Clipboard) -> ShareOutcome {
        share_or_copy(target, clipboard, &self.share_payload())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medreport_codeimage::ShareError;
    use std::cell::RefCell;

    const URL: &str = "http://localhost:8080/generated-report/MR-abcd-123456";

    #[derive(Default)]
    struct TestClipboard(RefCell<Option<String>>);

    impl Clipboard for TestClipboard {
        fn copy_text(&self, text: &str) -> Result<(), ShareError> {
            *self.0.borrow_mut() = Some(text.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_panel() {
        let mut panel = CodeImagePanel::new("MR-abcd-123456", URL, CodeImageSettings::default());
        assert_eq!(panel.state(), CodeImageState::Loading);
        assert!(panel
            .image_url()
            .unwrap()
            .contains("data=http%3A%2F%2Flocalhost%3A8080%2Fgenerated-report%2FMR-abcd-123456"));
        assert_eq!(panel.download_file_name(), "medical-report-qr-MR-abcd-123456.png");

        panel.mark_loaded();
        assert_eq!(panel.state(), CodeImageState::Ready);
        panel.mark_failed();
        assert_eq!(panel.state(), CodeImageState::Broken);
    }

    #[test]
    fn test_empty_address_is_broken() {
        let panel = CodeImagePanel::new("MR-abcd-123456", "", CodeImageSettings::default());
        assert_eq!(panel.state(), CodeImageState::Broken);
        assert_eq!(panel.image_url(), None);
        assert_eq!(panel.fallback_svg(), None);
    }

    #[test]
    fn test_fallback_svg() {
        let panel = CodeImagePanel::new("MR-abcd-123456", URL, CodeImageSettings::default());
        assert!(panel.fallback_svg().unwrap().contains("<svg"));
    }

    #[test]
    fn test_share_without_target_copies() {
        let panel = CodeImagePanel::new("MR-abcd-123456", URL, CodeImageSettings::default());
        let clipboard = TestClipboard::default();
        assert_eq!(panel.share(None, &clipboard), ShareOutcome::Copied);
        assert_eq!(clipboard.0.borrow().as_deref(), Some(URL));
    }

    #[cfg(feature = "fetch")]
    #[test]
    fn test_load_image_sets_state() {
        use std::io::{Read, Write};
        use std::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let server = std::thread::spawn(move || {
            let responses = [
                "HTTP/1.1 200 OK\r\nContent-Type: image/png\r\nContent-Length: 4\r\nConnection: close\r\n\r\nPNG!",
                "HTTP/1.1 500 Internal Server Error\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
            ];
            for response in responses {
                let (mut stream, _) = listener.accept().unwrap();
                let mut buf = [0u8; 2048];
                let _ = stream.read(&mut buf);
                stream.write_all(response.as_bytes()).unwrap();
            }
        });

        let settings = CodeImageSettings {
            endpoint: format!("http://{}/v1/create-qr-code/", addr),
            ..CodeImageSettings::default()
        };
        let mut panel = CodeImagePanel::new("MR-abcd-123456", URL, settings);

        assert_eq!(panel.load_image().unwrap(), b"PNG!");
        assert_eq!(panel.state(), CodeImageState::Ready);

        assert!(matches!(panel.load_image(), Err(CodeImageError::Request(_))));
        assert_eq!(panel.state(), CodeImageState::Broken);
        server.join().unwrap();
    }

    #[cfg(feature = "fetch")]
    #[test]
    fn test_load_image_without_request() {
        let mut panel = CodeImagePanel::new("MR-abcd-123456", "", CodeImageSettings::default());
        assert!(matches!(panel.load_image(), Err(CodeImageError::EmptyAddress)));
        assert_eq!(panel.state(), CodeImageState::Broken);
    }
}
