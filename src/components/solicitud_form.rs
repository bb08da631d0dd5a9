//! Solicitud Form View
//!
//! The reimbursement request form: the general-information grid, the
//! dynamic "Conceptos" list and the submit flow against the backend.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{ConceptoCard, TextAreaField, TextField};
use crate::form::Campo;
use crate::models::SolicitudViatico;

#[component]
pub fn SolicitudForm() -> impl IntoView {
    let (solicitud, set_solicitud) = signal(SolicitudViatico::new());
    let (enviando, set_enviando) = signal(false);
    let (aviso, set_aviso) = signal(None::<(bool, String)>);

    let valor_de =
        move |campo: Campo| Signal::derive(move || solicitud.with(|s| s.field(campo)));
    let cambia = move |campo: Campo| {
        Callback::new(move |valor: String| set_solicitud.update(|s| s.set_field(campo, &valor)))
    };

    // Only a length change rebuilds the card list; keystrokes inside a
    // card must not recreate its inputs.
    let num_conceptos = Memo::new(move |_| solicitud.with(|s| s.conceptos.len()));

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if enviando.get() {
            return;
        }
        let datos = solicitud.get();
        set_enviando.set(true);
        set_aviso.set(None);
        spawn_local(async move {
            match api::submit_solicitud(&datos).await {
                Ok(_) => {
                    set_aviso.set(Some((true, "Solicitud enviada correctamente.".to_string())));
                    set_solicitud.set(SolicitudViatico::new());
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("[Form] Error al enviar: {}", e).into());
                    // The form keeps its state so the user can correct
                    // the input and resubmit.
                    set_aviso.set(Some((false, e.to_string())));
                }
            }
            set_enviando.set(false);
        });
    };

    view! {
        <div class="form-container">
            <h1>"Solicitud de Viáticos"</h1>
            <form class="viatico-form" on:submit=on_submit>
                <div class="form-section">
                    <h2>"Información General"</h2>
                    <div class="form-grid">
                        <TextField
                            label="Tipo de Viático"
                            value=valor_de(Campo::TipoViatico)
                            on_change=cambia(Campo::TipoViatico)
                            required=true
                        />
                        <TextField
                            label="Línea de Negocio"
                            value=valor_de(Campo::LineaNegocio)
                            on_change=cambia(Campo::LineaNegocio)
                            required=true
                        />
                        <TextField
                            label="Zona/Ubicación"
                            value=valor_de(Campo::ZonaUbicacion)
                            on_change=cambia(Campo::ZonaUbicacion)
                            required=true
                        />
                        <TextField
                            label="Solicitante"
                            value=valor_de(Campo::Solicitante)
                            on_change=cambia(Campo::Solicitante)
                            required=true
                        />
                        <TextField
                            label="Centro de Costos"
                            value=valor_de(Campo::CentroCostos)
                            on_change=cambia(Campo::CentroCostos)
                            required=true
                        />
                        <TextField
                            label="No. Anticipo"
                            value=valor_de(Campo::NoAnticipo)
                            on_change=cambia(Campo::NoAnticipo)
                            required=true
                        />
                        <TextField
                            label="Cédula de Ciudadanía"
                            value=valor_de(Campo::CedulaCiudadania)
                            on_change=cambia(Campo::CedulaCiudadania)
                            required=true
                        />
                        <TextField
                            label="Fecha Inicio"
                            input_type="date"
                            value=valor_de(Campo::FechaInicio)
                            on_change=cambia(Campo::FechaInicio)
                            required=true
                        />
                        <TextField
                            label="Fecha Final"
                            input_type="date"
                            value=valor_de(Campo::FechaFinal)
                            on_change=cambia(Campo::FechaFinal)
                            required=true
                        />
                        <TextField
                            label="Fecha Solicitud"
                            input_type="date"
                            value=valor_de(Campo::FechaSolicitud)
                            on_change=cambia(Campo::FechaSolicitud)
                            required=true
                        />
                        <TextField
                            label="Ciudad Origen"
                            value=valor_de(Campo::CiudadOrigen)
                            on_change=cambia(Campo::CiudadOrigen)
                            required=true
                        />
                        <TextField
                            label="Ciudad Destino"
                            value=valor_de(Campo::CiudadDestino)
                            on_change=cambia(Campo::CiudadDestino)
                            required=true
                        />
                        <TextAreaField
                            label="Actividad a Realizar"
                            value=valor_de(Campo::ActividadRealizar)
                            on_change=cambia(Campo::ActividadRealizar)
                            required=true
                        />
                        <TextField
                            label="Funcionario a Consignar"
                            value=valor_de(Campo::FuncionarioConsignar)
                            on_change=cambia(Campo::FuncionarioConsignar)
                            required=true
                        />
                        <TextField
                            label="Entidad Bancaria"
                            value=valor_de(Campo::EntidadBancaria)
                            on_change=cambia(Campo::EntidadBancaria)
                            required=true
                        />
                        <div class="form-group">
                            <label>"Tipo de Cuenta"</label>
                            <select
                                required=true
                                prop:value=move || solicitud.with(|s| s.field(Campo::TipoCuenta))
                                on:change=move |ev| {
                                    set_solicitud.update(|s| {
                                        s.set_field(Campo::TipoCuenta, &event_target_value(&ev))
                                    })
                                }
                            >
                                <option value="">"Seleccionar"</option>
                                <option value="ahorros">"Ahorros"</option>
                                <option value="corriente">"Corriente"</option>
                            </select>
                        </div>
                        <TextField
                            label="No. de Cuenta"
                            value=valor_de(Campo::NoCuenta)
                            on_change=cambia(Campo::NoCuenta)
                            required=true
                        />
                        <TextField
                            label="Dinero Entregado"
                            input_type="number"
                            value=valor_de(Campo::DineroEntregado)
                            on_change=cambia(Campo::DineroEntregado)
                            required=true
                        />
                        <div class="form-group">
                            <label>"Saldo"</label>
                            <input
                                type="number"
                                readonly=true
                                prop:value=move || solicitud.with(|s| s.saldo.to_string())
                            />
                        </div>
                        <TextField
                            label="Correo del Funcionario"
                            input_type="email"
                            value=valor_de(Campo::CorreoFuncionario)
                            on_change=cambia(Campo::CorreoFuncionario)
                            required=true
                        />
                        <TextAreaField
                            label="Observaciones"
                            value=valor_de(Campo::Observaciones)
                            on_change=cambia(Campo::Observaciones)
                        />
                    </div>
                </div>

                <div class="form-section">
                    <h2>"Conceptos"</h2>
                    <For
                        each=move || 0..num_conceptos.get()
                        key=|indice| *indice
                        children=move |indice| {
                            view! {
                                <ConceptoCard
                                    indice=indice
                                    solicitud=solicitud
                                    set_solicitud=set_solicitud
                                />
                            }
                        }
                    />
                    <button
                        type="button"
                        class="add-btn"
                        on:click=move |_| set_solicitud.update(|s| s.add_concepto())
                    >
                        "Agregar Concepto"
                    </button>
                </div>

                {move || aviso.get().map(|(exito, texto)| {
                    let clase = if exito { "status-banner success" } else { "status-banner error" };
                    view! { <div class=clase>{texto}</div> }
                })}

                <button type="submit" class="submit-btn" disabled=move || enviando.get()>
                    {move || if enviando.get() { "Enviando..." } else { "Enviar Solicitud" }}
                </button>
            </form>
        </div>
    }
}
