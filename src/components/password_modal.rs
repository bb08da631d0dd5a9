//! Password Modal Component
//!
//! Modal prompt for the report download password.

use leptos::prelude::*;

#[component]
pub fn PasswordModal(
    #[prop(into)] on_confirm: Callback<String>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    let (clave, set_clave) = signal(String::new());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        on_confirm.run(clave.get());
    };

    view! {
        <div class="password-modal-overlay">
            <div class="password-modal">
                <h3>"Confirmar Descarga"</h3>
                <p>"Ingresa la contraseña para descargar el reporte:"</p>
                <form on:submit=on_submit>
                    <input
                        type="password"
                        class="password-input"
                        placeholder="Contraseña"
                        autofocus=true
                        prop:value=move || clave.get()
                        on:input=move |ev| set_clave.set(event_target_value(&ev))
                    />
                    <div class="modal-buttons">
                        <button type="button" class="cancel-btn" on:click=move |_| on_cancel.run(())>
                            "Cancelar"
                        </button>
                        <button type="submit" class="confirm-btn">"Confirmar"</button>
                    </div>
                </form>
            </div>
        </div>
    }
}
