//! Backend API Client
//!
//! HTTP bindings to the viáticos backend: form submission and the
//! spreadsheet report download. Every failure is mapped to one `ApiError`
//! category, each of which renders as a single user-facing sentence.

use std::error::Error;
use std::fmt::Write as _;
use std::time::Duration;

use reqwest::StatusCode;
use rust_decimal::Decimal;
use serde::Serialize;
use wasm_bindgen::JsCast;

use crate::models::SolicitudViatico;

/// Backend base address; overridable at build time.
pub const API_BASE_URL: &str = match option_env!("VIATICOS_API_URL") {
    Some(url) => url,
    None => "http://localhost:3000/api",
};

const SUBMIT_TIMEOUT: Duration = Duration::from_secs(10);
/// Larger bound: the backend generates the report before sending it.
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Outcomes of the backend interaction. `WrongContentType` and
/// `EmptyPayload` only come out of the report download.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("No se puede conectar al servidor. Verifica que el backend esté en ejecución.")]
    ServerUnavailable,
    #[error("URL del servidor no encontrada. Verifica la configuración de la API.")]
    AddressNotFound,
    #[error("Error del servidor: {status} - {message}")]
    ServerRejected { status: u16, message: String },
    #[error("No se recibió respuesta del servidor. Verifica la conexión a internet.")]
    NoResponse,
    #[error("El servidor no devolvió un archivo de Excel: {got}")]
    WrongContentType { got: String },
    #[error("El archivo recibido está vacío.")]
    EmptyPayload,
    #[error("Error inesperado: {detail}")]
    Unexpected { detail: String },
}

/// Wire shape of one line item; the soporte reduces to its file name, or
/// is absent when none was picked.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ConceptoPayload {
    item: String,
    fecha_factura: String,
    nit: String,
    nombre_emisor: String,
    concepto: String,
    no_factura: String,
    observaciones: String,
    valor: Decimal,
    soporte: Option<String>,
}

/// Wire shape of the full request, flattened for `POST /form`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SolicitudPayload {
    tipo_viatico: String,
    linea_negocio: String,
    zona_ubicacion: String,
    solicitante: String,
    centro_costos: String,
    no_anticipo: String,
    cedula_ciudadania: String,
    fecha_inicio: String,
    fecha_final: String,
    fecha_solicitud: String,
    ciudad_origen: String,
    ciudad_destino: String,
    actividad_realizar: String,
    funcionario_consignar: String,
    entidad_bancaria: String,
    tipo_cuenta: String,
    no_cuenta: String,
    dinero_entregado: Decimal,
    saldo: Decimal,
    correo_funcionario: String,
    observaciones: String,
    conceptos: Vec<ConceptoPayload>,
}

impl From<&SolicitudViatico> for SolicitudPayload {
    fn from(s: &SolicitudViatico) -> Self {
        Self {
            tipo_viatico: s.tipo_viatico.clone(),
            linea_negocio: s.linea_negocio.clone(),
            zona_ubicacion: s.zona_ubicacion.clone(),
            solicitante: s.solicitante.clone(),
            centro_costos: s.centro_costos.clone(),
            no_anticipo: s.no_anticipo.clone(),
            cedula_ciudadania: s.cedula_ciudadania.clone(),
            fecha_inicio: s.fecha_inicio.clone(),
            fecha_final: s.fecha_final.clone(),
            fecha_solicitud: s.fecha_solicitud.clone(),
            ciudad_origen: s.ciudad_origen.clone(),
            ciudad_destino: s.ciudad_destino.clone(),
            actividad_realizar: s.actividad_realizar.clone(),
            funcionario_consignar: s.funcionario_consignar.clone(),
            entidad_bancaria: s.entidad_bancaria.clone(),
            tipo_cuenta: s
                .tipo_cuenta
                .map(|t| t.as_str().to_string())
                .unwrap_or_default(),
            no_cuenta: s.no_cuenta.clone(),
            dinero_entregado: s.dinero_entregado,
            saldo: s.saldo,
            correo_funcionario: s.correo_funcionario.clone(),
            observaciones: s.observaciones.clone(),
            conceptos: s
                .conceptos
                .iter()
                .map(|c| ConceptoPayload {
                    item: c.item.clone(),
                    fecha_factura: c.fecha_factura.clone(),
                    nit: c.nit.clone(),
                    nombre_emisor: c.nombre_emisor.clone(),
                    concepto: c.concepto.clone(),
                    no_factura: c.no_factura.clone(),
                    observaciones: c.observaciones.clone(),
                    valor: c.valor,
                    soporte: c.soporte.as_ref().map(|a| a.nombre.clone()),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
struct DocumentRequest<'a> {
    period: &'a str,
}

/// Submit the assembled request. One network call, no retry; on failure
/// the caller still owns the unsent form state and may simply resubmit.
/// Success returns the response body as an opaque receipt.
pub async fn submit_solicitud(solicitud: &SolicitudViatico) -> Result<String, ApiError> {
    let payload = SolicitudPayload::from(solicitud);
    web_sys::console::log_1(&format!("[API] Enviando solicitud a {}/form", API_BASE_URL).into());

    let response = reqwest::Client::new()
        .post(format!("{}/form", API_BASE_URL))
        .json(&payload)
        .timeout(SUBMIT_TIMEOUT)
        .send()
        .await
        .map_err(classify_transport)?;

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    if !status.is_success() {
        web_sys::console::error_1(
            &format!("[API] El backend rechazó la solicitud: {}", status).into(),
        );
        return Err(rejection(status, &body));
    }
    Ok(body)
}

/// Fetch the consolidated spreadsheet and hand it to the browser as a file
/// download named after the requested period.
pub async fn descargar_reporte(period: &str) -> Result<(), ApiError> {
    web_sys::console::log_1(
        &format!("[API] Descargando reporte desde {}/document", API_BASE_URL).into(),
    );

    let response = reqwest::Client::new()
        .post(format!("{}/document", API_BASE_URL))
        .json(&DocumentRequest { period })
        .timeout(DOWNLOAD_TIMEOUT)
        .send()
        .await
        .map_err(classify_transport)?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(download_rejection(status, &body));
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let content_length = response
        .headers()
        .get(reqwest::header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();
    web_sys::console::log_1(
        &format!("[API] Respuesta del reporte: tipo '{}', {} bytes", content_type, content_length)
            .into(),
    );

    if !es_hoja_de_calculo(&content_type) {
        if es_texto(&content_type) {
            // The server answered with an error page instead of the file.
            let texto = response.text().await.unwrap_or_default();
            return Err(ApiError::WrongContentType {
                got: recortar(&texto, 200),
            });
        }
        return Err(ApiError::WrongContentType { got: content_type });
    }

    let bytes = response.bytes().await.map_err(|e| ApiError::Unexpected {
        detail: render_error(&e),
    })?;
    if bytes.is_empty() {
        return Err(ApiError::EmptyPayload);
    }

    guardar_archivo(&bytes, &format!("reporte_solicitudes_{}.xlsx", period))
}

/// Map a transport-level failure onto the user-facing taxonomy.
fn classify_transport(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::NoResponse;
    }
    classify_transport_detail(&render_error(&err))
}

/// Classification over the rendered error chain, most specific first. The
/// browser fetch error is opaque ("Failed to fetch", no refused/DNS
/// distinction), so it folds into `ServerUnavailable`; the native chains
/// keep the full taxonomy.
fn classify_transport_detail(detail: &str) -> ApiError {
    let d = detail.to_ascii_lowercase();
    if d.contains("connection refused") || d.contains("failed to fetch") {
        ApiError::ServerUnavailable
    } else if d.contains("dns error")
        || d.contains("failed to lookup address")
        || d.contains("name or service not known")
    {
        ApiError::AddressNotFound
    } else if d.contains("timed out") {
        ApiError::NoResponse
    } else {
        ApiError::Unexpected {
            detail: detail.to_string(),
        }
    }
}

/// Render an error with its full source chain; reqwest nests the
/// interesting part (refused/DNS) a few levels down.
fn render_error(err: &dyn Error) -> String {
    let mut rendered = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let _ = write!(rendered, ": {}", cause);
        source = cause.source();
    }
    rendered
}

/// Message for a non-success response: the body's message/error field if
/// present, else the status's canonical reason phrase.
fn rejection_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("message")
                .or_else(|| v.get("error"))
                .and_then(serde_json::Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("respuesta no reconocida")
                .to_string()
        })
}

fn rejection(status: StatusCode, body: &str) -> ApiError {
    ApiError::ServerRejected {
        status: status.as_u16(),
        message: rejection_message(status, body),
    }
}

/// Rejections of the report endpoint carry dedicated messages for the two
/// statuses operators actually hit.
fn download_rejection(status: StatusCode, body: &str) -> ApiError {
    let message = match status.as_u16() {
        404 => "Endpoint no encontrado. Verifica la ruta del backend.".to_string(),
        500 => "Error interno del servidor al generar el archivo.".to_string(),
        _ => rejection_message(status, body),
    };
    ApiError::ServerRejected {
        status: status.as_u16(),
        message,
    }
}

/// Exact media-type match, ignoring parameters such as `; charset=`.
fn es_hoja_de_calculo(content_type: &str) -> bool {
    media_type(content_type) == XLSX_MIME
}

fn es_texto(content_type: &str) -> bool {
    media_type(content_type).starts_with("text/")
}

fn media_type(content_type: &str) -> &str {
    content_type.split(';').next().unwrap_or_default().trim()
}

fn recortar(texto: &str, max: usize) -> String {
    texto.chars().take(max).collect()
}

/// Trigger the browser save-as dialog for the received bytes. The object
/// URL and the synthetic anchor are released shortly after the click,
/// since the save itself has no completion signal.
fn guardar_archivo(bytes: &[u8], nombre: &str) -> Result<(), ApiError> {
    let partes = js_sys::Array::new();
    partes.push(&js_sys::Uint8Array::from(bytes));
    let opciones = web_sys::BlobPropertyBag::new();
    opciones.set_type(XLSX_MIME);
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&partes, &opciones)
        .map_err(js_unexpected)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(js_unexpected)?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| ApiError::Unexpected {
            detail: "sin documento del navegador".to_string(),
        })?;
    let anchor: web_sys::HtmlAnchorElement = document
        .create_element("a")
        .map_err(js_unexpected)?
        .dyn_into()
        .map_err(|_| ApiError::Unexpected {
            detail: "no se pudo crear el enlace de descarga".to_string(),
        })?;
    anchor.set_href(&url);
    anchor.set_download(nombre);
    if let Some(body) = document.body() {
        let _ = body.append_child(&anchor);
    }
    anchor.click();
    web_sys::console::log_1(&format!("[API] Descarga disparada: {}", nombre).into());

    leptos::task::spawn_local(async move {
        gloo_timers::future::TimeoutFuture::new(100).await;
        anchor.remove();
        let _ = web_sys::Url::revoke_object_url(&url);
    });
    Ok(())
}

fn js_unexpected(err: wasm_bindgen::JsValue) -> ApiError {
    ApiError::Unexpected {
        detail: format!("{:?}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{Campo, CampoConcepto};
    use crate::models::Adjunto;

    #[test]
    fn conexion_rechazada_es_server_unavailable() {
        let err = classify_transport_detail(
            "error sending request: error trying to connect: tcp connect error: \
             Connection refused (os error 111)",
        );
        assert_eq!(err, ApiError::ServerUnavailable);
    }

    #[test]
    fn fallo_de_fetch_del_navegador_es_server_unavailable() {
        let err = classify_transport_detail("error sending request: TypeError: Failed to fetch");
        assert_eq!(err, ApiError::ServerUnavailable);
    }

    #[test]
    fn host_no_resoluble_es_address_not_found() {
        let err = classify_transport_detail(
            "error sending request: dns error: failed to lookup address information: \
             Name or service not known",
        );
        assert_eq!(err, ApiError::AddressNotFound);
    }

    #[test]
    fn espera_agotada_es_no_response() {
        let err = classify_transport_detail("error sending request: operation timed out");
        assert_eq!(err, ApiError::NoResponse);
    }

    #[test]
    fn fallo_desconocido_conserva_el_detalle() {
        let err = classify_transport_detail("builder error: relative URL without a base");
        assert_eq!(
            err,
            ApiError::Unexpected {
                detail: "builder error: relative URL without a base".to_string()
            }
        );
    }

    #[test]
    fn rechazo_prefiere_el_mensaje_del_cuerpo() {
        let err = rejection(StatusCode::INTERNAL_SERVER_ERROR, r#"{"message":"boom"}"#);
        assert_eq!(
            err,
            ApiError::ServerRejected {
                status: 500,
                message: "boom".to_string()
            }
        );
    }

    #[test]
    fn rechazo_acepta_el_campo_error_como_alternativa() {
        let err = rejection(StatusCode::BAD_REQUEST, r#"{"error":"cédula inválida"}"#);
        assert_eq!(
            err,
            ApiError::ServerRejected {
                status: 400,
                message: "cédula inválida".to_string()
            }
        );
    }

    #[test]
    fn rechazo_sin_cuerpo_usa_la_frase_del_estado() {
        let err = rejection(StatusCode::BAD_REQUEST, "");
        assert_eq!(
            err,
            ApiError::ServerRejected {
                status: 400,
                message: "Bad Request".to_string()
            }
        );
    }

    #[test]
    fn descarga_tiene_mensajes_propios_para_404_y_500() {
        let not_found = download_rejection(StatusCode::NOT_FOUND, "");
        assert_eq!(
            not_found,
            ApiError::ServerRejected {
                status: 404,
                message: "Endpoint no encontrado. Verifica la ruta del backend.".to_string()
            }
        );

        let internal = download_rejection(StatusCode::INTERNAL_SERVER_ERROR, r#"{"message":"x"}"#);
        assert_eq!(
            internal,
            ApiError::ServerRejected {
                status: 500,
                message: "Error interno del servidor al generar el archivo.".to_string()
            }
        );
    }

    #[test]
    fn payload_reduce_el_soporte_a_su_nombre() {
        let mut s = SolicitudViatico::new();
        s.add_concepto();
        s.add_concepto();
        s.set_concepto_soporte(
            0,
            Some(Adjunto {
                nombre: "factura.pdf".to_string(),
                tamano: 1024,
            }),
        );

        let payload = SolicitudPayload::from(&s);
        assert_eq!(payload.conceptos[0].soporte.as_deref(), Some("factura.pdf"));
        assert_eq!(payload.conceptos[1].soporte, None);
    }

    #[test]
    fn payload_serializa_camel_case_con_montos_numericos() {
        let mut s = SolicitudViatico::new();
        s.set_field(Campo::Solicitante, "Ana Pérez");
        s.set_field(Campo::TipoCuenta, "ahorros");
        s.set_field(Campo::DineroEntregado, "150.5");
        s.add_concepto();
        s.set_concepto_field(0, CampoConcepto::Valor, "50.5");

        let json = serde_json::to_value(SolicitudPayload::from(&s)).unwrap();
        assert_eq!(json["solicitante"], "Ana Pérez");
        assert_eq!(json["tipoCuenta"], "ahorros");
        assert_eq!(json["dineroEntregado"], serde_json::json!(150.5));
        assert_eq!(json["saldo"], serde_json::json!(100.0));
        assert_eq!(json["conceptos"][0]["valor"], serde_json::json!(50.5));
        assert!(json["conceptos"][0]["soporte"].is_null());
    }

    #[test]
    fn tipo_de_contenido_exacto_ignorando_parametros() {
        assert!(es_hoja_de_calculo(XLSX_MIME));
        assert!(es_hoja_de_calculo(&format!("{}; charset=utf-8", XLSX_MIME)));
        assert!(!es_hoja_de_calculo("text/html"));
        assert!(!es_hoja_de_calculo("application/octet-stream"));

        assert!(es_texto("text/html; charset=utf-8"));
        assert!(es_texto("text/plain"));
        assert!(!es_texto("application/json"));
    }

    #[test]
    fn recortar_limita_el_detalle() {
        let texto = "x".repeat(500);
        assert_eq!(recortar(&texto, 200).len(), 200);
        assert_eq!(recortar("corto", 200), "corto");
    }
}
