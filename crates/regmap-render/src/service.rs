//! Download request handling.
//!
//! A request carries the device as the web form submits it: camelCase
//! keys, `bitWidth` as either `"32"` or `32`, and sections told apart by
//! whether they have a name. Requests missing a required top-level field
//! or with no registers are rejected before anything is generated.

use serde::Deserialize;

use regmap_core::{Access, BitWidth, DescriptorError, DeviceDescriptor, Register, Section};
use regmap_emit::{emit_artifacts, ArtifactKind, EmitError};

use crate::error::{RenderError, ServiceError};
use crate::typeset::Typesetter;

/// A generation request as submitted by a client.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    #[serde(default)]
    pub device_name: Option<String>,
    #[serde(default)]
    pub device_description: Option<String>,
    #[serde(default)]
    pub base_address: Option<String>,
    #[serde(default)]
    pub bit_width: Option<WireBitWidth>,
    #[serde(default)]
    pub registers: Option<Vec<WireRegister>>,
}

/// `bitWidth` as sent by the client.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum WireBitWidth {
    Number(u32),
    Text(String),
}

/// A register as sent by the client.
#[derive(Debug, Clone, Deserialize)]
pub struct WireRegister {
    /// Client-side identity; ignored by generation.
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub sections: Vec<WireSection>,
}

/// A section as sent by the client. Named sections are fields.
#[derive(Debug, Clone, Deserialize)]
pub struct WireSection {
    #[serde(default)]
    pub name: Option<String>,
    pub bits: u32,
    #[serde(default)]
    pub access: Option<Access>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A file ready to be sent back to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

impl Download {
    /// `Content-Disposition` header value.
    pub fn content_disposition(&self) -> String {
        format!("attachment; filename={}", self.file_name)
    }
}

impl GenerateRequest {
    /// Parse a request body.
    pub fn from_json(body: &str) -> Result<Self, ServiceError> {
        serde_json::from_str(body).map_err(|e| ServiceError::InvalidRequest {
            detail: e.to_string(),
        })
    }

    /// Check required fields and convert to a descriptor.
    pub fn into_descriptor(self) -> Result<DeviceDescriptor, ServiceError> {
        let name = required(self.device_name, "deviceName")?;
        let base_address = required(self.base_address, "baseAddress")?;
        let bit_width = self
            .bit_width
            .ok_or(ServiceError::MissingField { field: "bitWidth" })?;
        let registers = self
            .registers
            .ok_or(ServiceError::MissingField { field: "registers" })?;
        if registers.is_empty() {
            return Err(ServiceError::NoRegisters);
        }

        let bit_width = match &bit_width {
            WireBitWidth::Number(n) => BitWidth::try_from(*n).ok(),
            WireBitWidth::Text(s) => BitWidth::parse(s),
        }
        .ok_or_else(|| ServiceError::InvalidRequest {
            detail: format!("bitWidth must be 32 or 64, got {bit_width:?}"),
        })?;

        let registers = registers
            .into_iter()
            .map(WireRegister::into_register)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(DeviceDescriptor {
            name,
            description: self.device_description.unwrap_or_default(),
            base_address,
            bit_width,
            registers,
        })
    }
}

impl WireRegister {
    fn into_register(self) -> Result<Register, ServiceError> {
        let register_name = self.name;
        let sections = self
            .sections
            .into_iter()
            .map(|s| match s.name {
                Some(name) => {
                    let access = s.access.ok_or_else(|| ServiceError::InvalidRequest {
                        detail: format!("field '{register_name}.{name}' has no access"),
                    })?;
                    Ok(Section::Field {
                        name,
                        bits: s.bits,
                        access,
                        description: s.description,
                    })
                }
                None => Ok(Section::Spare { bits: s.bits }),
            })
            .collect::<Result<Vec<_>, ServiceError>>()?;
        Ok(Register {
            name: register_name,
            description: self.description,
            sections,
        })
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, ServiceError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ServiceError::MissingField { field }),
    }
}

/// Emit one source artifact (`.h`, `.c`, or `.tex`) for download.
pub fn handle_source(request: GenerateRequest, kind: ArtifactKind) -> Result<Download, ServiceError> {
    let device = request.into_descriptor()?;
    let artifact = emit_artifacts(&device, &[kind])
        .map_err(emit_failure)?
        .into_iter()
        .next()
        .ok_or(ServiceError::GenerationFailed)?;
    Ok(Download {
        file_name: artifact.file_name,
        content_type: kind.content_type(),
        bytes: artifact.content.into_bytes(),
    })
}

/// Typeset the register documentation and return it as `{device}_registers.pdf`.
pub fn handle_pdf(request: GenerateRequest, typesetter: &Typesetter) -> Result<Download, ServiceError> {
    let device = request.into_descriptor()?;
    match typesetter.render_device(&device) {
        Ok(bytes) => Ok(Download {
            file_name: format!("{}_registers.pdf", device.name),
            content_type: "application/pdf",
            bytes,
        }),
        Err(RenderError::Emit(e)) => Err(emit_failure(e)),
        Err(e) => {
            log::error!("PDF generation failed for '{}': {e}", device.name);
            Err(ServiceError::GenerationFailed)
        }
    }
}

fn emit_failure(e: EmitError) -> ServiceError {
    match e {
        EmitError::Descriptor(DescriptorError::Invalid { issues }) => ServiceError::InvalidRequest {
            detail: issues
                .iter()
                .map(|i| i.to_string())
                .collect::<Vec<_>>()
                .join("; "),
        },
        other => {
            log::error!("source generation failed: {other}");
            ServiceError::GenerationFailed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UART_REQUEST: &str = r#"{
        "deviceName": "UART",
        "deviceDescription": "Serial port",
        "baseAddress": "0x40000000",
        "bitWidth": "32",
        "registers": [
            {
                "id": "1712345678901",
                "name": "CTRL",
                "description": "Control",
                "sections": [
                    {"name": "EN", "bits": 1, "access": "read-write", "description": "Enable"},
                    {"bits": 31}
                ]
            }
        ]
    }"#;

    #[test]
    fn converts_wire_request() {
        let device = GenerateRequest::from_json(UART_REQUEST)
            .unwrap()
            .into_descriptor()
            .unwrap();
        assert_eq!(device.name, "UART");
        assert_eq!(device.bit_width, BitWidth::W32);
        assert_eq!(device.description, "Serial port");
        let sections = &device.registers[0].sections;
        assert_eq!(
            sections[0],
            Section::field("EN", 1, Access::ReadWrite).with_description("Enable")
        );
        assert_eq!(sections[1], Section::spare(31));
    }

    #[test]
    fn numeric_bit_width_accepted() {
        let body = UART_REQUEST.replace("\"bitWidth\": \"32\"", "\"bitWidth\": 32");
        let device = GenerateRequest::from_json(&body)
            .unwrap()
            .into_descriptor()
            .unwrap();
        assert_eq!(device.bit_width, BitWidth::W32);
    }

    #[test]
    fn missing_required_fields() {
        for (field, key) in [
            ("deviceName", "\"deviceName\": \"UART\","),
            ("baseAddress", "\"baseAddress\": \"0x40000000\","),
            ("bitWidth", "\"bitWidth\": \"32\","),
        ] {
            let body = UART_REQUEST.replace(key, "");
            let err = GenerateRequest::from_json(&body)
                .unwrap()
                .into_descriptor()
                .unwrap_err();
            assert_eq!(err.to_string(), format!("missing required parameter: {field}"));
            assert_eq!(err.status_code(), 400);
        }
    }

    #[test]
    fn empty_device_name_is_missing() {
        let body = UART_REQUEST.replace("\"deviceName\": \"UART\"", "\"deviceName\": \"\"");
        let err = GenerateRequest::from_json(&body)
            .unwrap()
            .into_descriptor()
            .unwrap_err();
        assert!(matches!(err, ServiceError::MissingField { field: "deviceName" }));
    }

    #[test]
    fn empty_register_list_rejected() {
        let req = GenerateRequest {
            device_name: Some("UART".into()),
            base_address: Some("0x0".into()),
            bit_width: Some(WireBitWidth::Number(32)),
            registers: Some(vec![]),
            ..Default::default()
        };
        assert!(matches!(req.into_descriptor(), Err(ServiceError::NoRegisters)));
    }

    #[test]
    fn bad_bit_width_rejected() {
        let body = UART_REQUEST.replace("\"bitWidth\": \"32\"", "\"bitWidth\": \"16\"");
        let err = GenerateRequest::from_json(&body)
            .unwrap()
            .into_descriptor()
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidRequest { .. }));
    }

    #[test]
    fn malformed_json_rejected() {
        assert!(matches!(
            GenerateRequest::from_json("{not json"),
            Err(ServiceError::InvalidRequest { .. })
        ));
    }

    #[test]
    fn source_download_names() {
        let req = GenerateRequest::from_json(UART_REQUEST).unwrap();
        let download = handle_source(req, ArtifactKind::Header).unwrap();
        assert_eq!(download.file_name, "uart_registers.h");
        assert_eq!(download.content_type, "text/plain");
        assert_eq!(
            download.content_disposition(),
            "attachment; filename=uart_registers.h"
        );
        let text = String::from_utf8(download.bytes).unwrap();
        assert!(text.contains("#define CTRL_EN_SHIFT ((uint32_t)(0U))"));
    }

    #[test]
    fn structural_problems_are_client_errors() {
        let body = UART_REQUEST.replace("{\"bits\": 31}", "{\"bits\": 30}");
        let req = GenerateRequest::from_json(&body).unwrap();
        let err = handle_source(req, ArtifactKind::Body).unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert!(err.to_string().contains("covers 31 bits, expected 32"));
    }

    #[test]
    fn typesetter_failure_is_generic() {
        let req = GenerateRequest::from_json(UART_REQUEST).unwrap();
        let typesetter = Typesetter::new("regmap-no-such-typesetter", vec![]);
        let err = handle_pdf(req, &typesetter).unwrap_err();
        assert!(matches!(err, ServiceError::GenerationFailed));
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.to_json()["error"], "document generation failed");
    }

    #[cfg(unix)]
    #[test]
    fn pdf_download_uses_device_name() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("fake-latex.sh");
        std::fs::write(
            &script,
            "for last; do :; done\nprintf '%%PDF' > \"${last%.tex}.pdf\"\n",
        )
        .unwrap();
        let typesetter = Typesetter::new("sh", vec![script.display().to_string()]);

        let req = GenerateRequest::from_json(UART_REQUEST).unwrap();
        let download = handle_pdf(req, &typesetter).unwrap();
        assert_eq!(download.file_name, "UART_registers.pdf");
        assert_eq!(download.content_type, "application/pdf");
        assert_eq!(download.bytes, b"%PDF");
    }
}
