//! Concepto Card Component
//!
//! One numbered expense entry inside the "Conceptos" section: its field
//! grid, the soporte file picker and the remove button.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

use crate::components::{TextAreaField, TextField};
use crate::form::CampoConcepto;
use crate::models::{Adjunto, SolicitudViatico};

/// Card for the line item at `indice`.
#[component]
pub fn ConceptoCard(
    indice: usize,
    solicitud: ReadSignal<SolicitudViatico>,
    set_solicitud: WriteSignal<SolicitudViatico>,
) -> impl IntoView {
    let valor_de = move |campo: CampoConcepto| {
        Signal::derive(move || solicitud.with(|s| s.concepto_field(indice, campo)))
    };
    let cambia = move |campo: CampoConcepto| {
        Callback::new(move |valor: String| {
            set_solicitud.update(|s| s.set_concepto_field(indice, campo, &valor))
        })
    };

    // Reduce the picked file to its name and size; clearing the input
    // clears the reference.
    let on_soporte = move |ev: web_sys::Event| {
        let archivo = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
            .and_then(|input| input.files())
            .and_then(|files| files.get(0));
        let adjunto = archivo.map(|f| Adjunto {
            nombre: f.name(),
            tamano: f.size() as u64,
        });
        set_solicitud.update(|s| s.set_concepto_soporte(indice, adjunto));
    };

    let soporte = move || solicitud.with(|s| s.conceptos.get(indice).and_then(|c| c.soporte.clone()));

    view! {
        <div class="concepto-card">
            <h3>{format!("Concepto {}", indice + 1)}</h3>
            <div class="form-grid">
                <TextField
                    label="Ítem"
                    value=valor_de(CampoConcepto::Item)
                    on_change=cambia(CampoConcepto::Item)
                    required=true
                />
                <TextField
                    label="Fecha Factura"
                    input_type="date"
                    value=valor_de(CampoConcepto::FechaFactura)
                    on_change=cambia(CampoConcepto::FechaFactura)
                    required=true
                />
                <TextField
                    label="NIT"
                    value=valor_de(CampoConcepto::Nit)
                    on_change=cambia(CampoConcepto::Nit)
                    required=true
                />
                <TextField
                    label="Nombre Emisor"
                    value=valor_de(CampoConcepto::NombreEmisor)
                    on_change=cambia(CampoConcepto::NombreEmisor)
                    required=true
                />
                <TextField
                    label="Concepto"
                    value=valor_de(CampoConcepto::Concepto)
                    on_change=cambia(CampoConcepto::Concepto)
                    required=true
                />
                <TextField
                    label="No. Factura"
                    value=valor_de(CampoConcepto::NoFactura)
                    on_change=cambia(CampoConcepto::NoFactura)
                    required=true
                />
                <TextField
                    label="Valor"
                    input_type="number"
                    value=valor_de(CampoConcepto::Valor)
                    on_change=cambia(CampoConcepto::Valor)
                    required=true
                />
                <div class="form-group">
                    <label>"Soporte"</label>
                    <input type="file" on:change=on_soporte />
                    {move || soporte().map(|a| view! {
                        <span class="soporte-nombre">
                            {format!("{} ({})", a.nombre, format_size(a.tamano))}
                        </span>
                    })}
                </div>
                <TextAreaField
                    label="Observaciones"
                    value=valor_de(CampoConcepto::Observaciones)
                    on_change=cambia(CampoConcepto::Observaciones)
                />
            </div>
            <button
                type="button"
                class="remove-btn"
                on:click=move |_| set_solicitud.update(|s| s.remove_concepto(indice))
            >
                "Eliminar Concepto"
            </button>
        </div>
    }
}

fn format_size(size: u64) -> String {
    if size < 1024 {
        format!("{} B", size)
    } else if size < 1024 * 1024 {
        format!("{:.1} KB", size as f64 / 1024.0)
    } else {
        format!("{:.1} MB", size as f64 / (1024.0 * 1024.0))
    }
}
