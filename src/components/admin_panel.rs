//! Admin Panel View
//!
//! Download card for the consolidated spreadsheet report, gated behind the
//! shared panel password.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::PasswordModal;

/// Shared password for the download prompt, compared client-side. This is
/// a usability gate against accidental downloads, not an access control:
/// anyone holding the bundle can read it. Real authorization, if any,
/// belongs to the backend.
const CLAVE_DESCARGA: &str = "admin123456";

/// Period covered by the report; the backend currently exports everything.
const PERIODO_COMPLETO: &str = "full";

/// Check a candidate password against the shared panel secret.
pub fn authorize(candidata: &str) -> bool {
    candidata == CLAVE_DESCARGA
}

/// Download-flow states. Failure, success and cancellation all return to
/// `Reposo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlujoDescarga {
    #[default]
    Reposo,
    EsperandoClave,
    Descargando,
}

impl FlujoDescarga {
    /// Transition for a password submission: a wrong password keeps the
    /// prompt open.
    fn tras_clave(self, autorizada: bool) -> FlujoDescarga {
        match (self, autorizada) {
            (FlujoDescarga::EsperandoClave, true) => FlujoDescarga::Descargando,
            (estado, _) => estado,
        }
    }
}

#[component]
pub fn AdminPanel() -> impl IntoView {
    let (flujo, set_flujo) = signal(FlujoDescarga::default());
    let (aviso, set_aviso) = signal(None::<(bool, String)>);

    let on_confirmar = Callback::new(move |clave: String| {
        let siguiente = flujo.get_untracked().tras_clave(authorize(&clave));
        set_flujo.set(siguiente);
        if siguiente != FlujoDescarga::Descargando {
            set_aviso.set(Some((
                false,
                "Contraseña incorrecta. Inténtalo de nuevo.".to_string(),
            )));
            return;
        }
        set_aviso.set(None);
        spawn_local(async move {
            match api::descargar_reporte(PERIODO_COMPLETO).await {
                Ok(()) => {
                    set_aviso.set(Some((true, "Reporte descargado correctamente.".to_string())));
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("[Panel] Error al descargar: {}", e).into());
                    set_aviso.set(Some((false, e.to_string())));
                }
            }
            set_flujo.set(FlujoDescarga::Reposo);
        });
    });

    let on_cancelar = Callback::new(move |_: ()| {
        set_aviso.set(None);
        set_flujo.set(FlujoDescarga::Reposo);
    });

    view! {
        <div class="panel-container">
            <div class="panel-card">
                <h2>"Reporte Completo"</h2>
                <p>"Descarga todos los registros de solicitudes en una hoja de cálculo."</p>
                <button
                    class="download-btn"
                    disabled=move || flujo.get() == FlujoDescarga::Descargando
                    on:click=move |_| set_flujo.set(FlujoDescarga::EsperandoClave)
                >
                    {move || {
                        if flujo.get() == FlujoDescarga::Descargando {
                            "Descargando..."
                        } else {
                            "Descargar Reporte Completo"
                        }
                    }}
                </button>
                {move || aviso.get().map(|(exito, texto)| {
                    let clase = if exito { "status-banner success" } else { "status-banner error" };
                    view! { <div class=clase>{texto}</div> }
                })}
            </div>

            <Show when=move || flujo.get() == FlujoDescarga::EsperandoClave>
                <PasswordModal on_confirm=on_confirmar on_cancel=on_cancelar />
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn autoriza_la_clave_compartida() {
        assert!(authorize("admin123456"));
        assert!(!authorize("wrong"));
        assert!(!authorize(""));
    }

    #[test]
    fn clave_incorrecta_mantiene_el_prompt_abierto() {
        let flujo = FlujoDescarga::EsperandoClave;
        assert_eq!(flujo.tras_clave(false), FlujoDescarga::EsperandoClave);
    }

    #[test]
    fn clave_correcta_pasa_a_descargando() {
        let flujo = FlujoDescarga::EsperandoClave;
        assert_eq!(flujo.tras_clave(true), FlujoDescarga::Descargando);
    }

    #[test]
    fn el_flujo_arranca_en_reposo() {
        assert_eq!(FlujoDescarga::default(), FlujoDescarga::Reposo);
    }
}
