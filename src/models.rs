//! Frontend Models
//!
//! Data held by the request form: the reimbursement aggregate and its
//! itemized expense entries. Wire encoding lives in `api`.

use rust_decimal::Decimal;

/// Bank account kind for the disbursement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TipoCuenta {
    Ahorros,
    Corriente,
}

impl TipoCuenta {
    pub fn as_str(&self) -> &'static str {
        match self {
            TipoCuenta::Ahorros => "ahorros",
            TipoCuenta::Corriente => "corriente",
        }
    }

    /// Parse the `<select>` value; anything unknown (including the empty
    /// placeholder option) means "not selected".
    pub fn from_value(valor: &str) -> Option<Self> {
        match valor {
            "ahorros" => Some(TipoCuenta::Ahorros),
            "corriente" => Some(TipoCuenta::Corriente),
            _ => None,
        }
    }
}

/// Supporting-document reference ("soporte") attached to a line item.
///
/// Holds the picked file's name and size only; the bytes stay with the file
/// input and are never transmitted by this flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adjunto {
    pub nombre: String,
    pub tamano: u64,
}

/// One itemized expense entry ("concepto") of a request.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Concepto {
    pub item: String,
    pub fecha_factura: String,
    pub nit: String,
    pub nombre_emisor: String,
    pub concepto: String,
    pub no_factura: String,
    pub observaciones: String,
    pub valor: Decimal,
    pub soporte: Option<Adjunto>,
}

/// The reimbursement request aggregate. One per form view, created empty,
/// existing only in memory until the backend accepts it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SolicitudViatico {
    pub tipo_viatico: String,
    pub linea_negocio: String,
    pub zona_ubicacion: String,
    pub solicitante: String,
    pub centro_costos: String,
    pub no_anticipo: String,
    /// Digits only, enforced at entry.
    pub cedula_ciudadania: String,
    pub fecha_inicio: String,
    pub fecha_final: String,
    pub fecha_solicitud: String,
    pub ciudad_origen: String,
    pub ciudad_destino: String,
    pub actividad_realizar: String,
    pub funcionario_consignar: String,
    pub entidad_bancaria: String,
    pub tipo_cuenta: Option<TipoCuenta>,
    /// Digits only, enforced at entry.
    pub no_cuenta: String,
    pub dinero_entregado: Decimal,
    /// Derived: `dinero_entregado - Σ valor`. Recomputed by every mutator
    /// that can affect it; may go negative.
    pub saldo: Decimal,
    pub correo_funcionario: String,
    pub observaciones: String,
    pub conceptos: Vec<Concepto>,
}

impl SolicitudViatico {
    pub fn new() -> Self {
        Self::default()
    }
}
