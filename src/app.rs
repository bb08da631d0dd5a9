//! Viáticos Frontend App
//!
//! Top-level component switching between the request form and the admin
//! panel. Each view owns its state exclusively; switching away tears the
//! previous view down.

use leptos::prelude::*;

use crate::components::{AdminPanel, SolicitudForm};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Vista {
    Formulario,
    Panel,
}

#[component]
pub fn App() -> impl IntoView {
    let (vista, set_vista) = signal(Vista::Formulario);

    let clase_tab = move |v: Vista| {
        move || {
            if vista.get() == v {
                "view-tab active"
            } else {
                "view-tab"
            }
        }
    };

    view! {
        <div class="app-layout">
            <nav class="view-switch">
                <button
                    class=clase_tab(Vista::Formulario)
                    on:click=move |_| set_vista.set(Vista::Formulario)
                >
                    "Solicitud"
                </button>
                <button
                    class=clase_tab(Vista::Panel)
                    on:click=move |_| set_vista.set(Vista::Panel)
                >
                    "Panel"
                </button>
            </nav>

            {move || match vista.get() {
                Vista::Formulario => view! { <SolicitudForm /> }.into_any(),
                Vista::Panel => view! { <AdminPanel /> }.into_any(),
            }}
        </div>
    }
}
