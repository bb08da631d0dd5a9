//! Form State Updates
//!
//! Mutators for the owned `SolicitudViatico` aggregate. Every mutation that
//! can affect the derived balance recomputes it before returning, so
//! `saldo` is never stale relative to the data on screen.

use rust_decimal::Decimal;

use crate::models::{Adjunto, Concepto, SolicitudViatico, TipoCuenta};

/// Scalar fields of the aggregate settable from the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Campo {
    TipoViatico,
    LineaNegocio,
    ZonaUbicacion,
    Solicitante,
    CentroCostos,
    NoAnticipo,
    CedulaCiudadania,
    FechaInicio,
    FechaFinal,
    FechaSolicitud,
    CiudadOrigen,
    CiudadDestino,
    ActividadRealizar,
    FuncionarioConsignar,
    EntidadBancaria,
    TipoCuenta,
    NoCuenta,
    DineroEntregado,
    CorreoFuncionario,
    Observaciones,
}

/// Fields of one line item settable from the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CampoConcepto {
    Item,
    FechaFactura,
    Nit,
    NombreEmisor,
    Concepto,
    NoFactura,
    Observaciones,
    Valor,
}

impl SolicitudViatico {
    /// Set one scalar field from its raw input value.
    ///
    /// Identification and account numbers keep digits only; the advance
    /// amount parses as a decimal (empty or malformed input counts as
    /// zero) and triggers the balance recompute.
    pub fn set_field(&mut self, campo: Campo, valor: &str) {
        match campo {
            Campo::TipoViatico => self.tipo_viatico = valor.to_string(),
            Campo::LineaNegocio => self.linea_negocio = valor.to_string(),
            Campo::ZonaUbicacion => self.zona_ubicacion = valor.to_string(),
            Campo::Solicitante => self.solicitante = valor.to_string(),
            Campo::CentroCostos => self.centro_costos = valor.to_string(),
            Campo::NoAnticipo => self.no_anticipo = valor.to_string(),
            Campo::CedulaCiudadania => self.cedula_ciudadania = solo_digitos(valor),
            Campo::FechaInicio => self.fecha_inicio = valor.to_string(),
            Campo::FechaFinal => self.fecha_final = valor.to_string(),
            Campo::FechaSolicitud => self.fecha_solicitud = valor.to_string(),
            Campo::CiudadOrigen => self.ciudad_origen = valor.to_string(),
            Campo::CiudadDestino => self.ciudad_destino = valor.to_string(),
            Campo::ActividadRealizar => self.actividad_realizar = valor.to_string(),
            Campo::FuncionarioConsignar => self.funcionario_consignar = valor.to_string(),
            Campo::EntidadBancaria => self.entidad_bancaria = valor.to_string(),
            Campo::TipoCuenta => self.tipo_cuenta = TipoCuenta::from_value(valor),
            Campo::NoCuenta => self.no_cuenta = solo_digitos(valor),
            Campo::DineroEntregado => {
                self.dinero_entregado = parse_monto(valor);
                self.recompute_saldo();
            }
            Campo::CorreoFuncionario => self.correo_funcionario = valor.to_string(),
            Campo::Observaciones => self.observaciones = valor.to_string(),
        }
    }

    /// Current value of one scalar field, rendered for its input control.
    pub fn field(&self, campo: Campo) -> String {
        match campo {
            Campo::TipoViatico => self.tipo_viatico.clone(),
            Campo::LineaNegocio => self.linea_negocio.clone(),
            Campo::ZonaUbicacion => self.zona_ubicacion.clone(),
            Campo::Solicitante => self.solicitante.clone(),
            Campo::CentroCostos => self.centro_costos.clone(),
            Campo::NoAnticipo => self.no_anticipo.clone(),
            Campo::CedulaCiudadania => self.cedula_ciudadania.clone(),
            Campo::FechaInicio => self.fecha_inicio.clone(),
            Campo::FechaFinal => self.fecha_final.clone(),
            Campo::FechaSolicitud => self.fecha_solicitud.clone(),
            Campo::CiudadOrigen => self.ciudad_origen.clone(),
            Campo::CiudadDestino => self.ciudad_destino.clone(),
            Campo::ActividadRealizar => self.actividad_realizar.clone(),
            Campo::FuncionarioConsignar => self.funcionario_consignar.clone(),
            Campo::EntidadBancaria => self.entidad_bancaria.clone(),
            Campo::TipoCuenta => self
                .tipo_cuenta
                .map(|t| t.as_str().to_string())
                .unwrap_or_default(),
            Campo::NoCuenta => self.no_cuenta.clone(),
            Campo::DineroEntregado => self.dinero_entregado.to_string(),
            Campo::CorreoFuncionario => self.correo_funcionario.clone(),
            Campo::Observaciones => self.observaciones.clone(),
        }
    }

    /// Set one field of the line item at `indice`. Panics on an
    /// out-of-range index.
    pub fn set_concepto_field(&mut self, indice: usize, campo: CampoConcepto, valor: &str) {
        let concepto = &mut self.conceptos[indice];
        match campo {
            CampoConcepto::Item => concepto.item = valor.to_string(),
            CampoConcepto::FechaFactura => concepto.fecha_factura = valor.to_string(),
            CampoConcepto::Nit => concepto.nit = valor.to_string(),
            CampoConcepto::NombreEmisor => concepto.nombre_emisor = valor.to_string(),
            CampoConcepto::Concepto => concepto.concepto = valor.to_string(),
            CampoConcepto::NoFactura => concepto.no_factura = valor.to_string(),
            CampoConcepto::Observaciones => concepto.observaciones = valor.to_string(),
            CampoConcepto::Valor => concepto.valor = parse_monto(valor),
        }
        if campo == CampoConcepto::Valor {
            self.recompute_saldo();
        }
    }

    /// Current value of one line-item field. A transient out-of-range read
    /// (mid-removal render) yields the empty string.
    pub fn concepto_field(&self, indice: usize, campo: CampoConcepto) -> String {
        let Some(concepto) = self.conceptos.get(indice) else {
            return String::new();
        };
        match campo {
            CampoConcepto::Item => concepto.item.clone(),
            CampoConcepto::FechaFactura => concepto.fecha_factura.clone(),
            CampoConcepto::Nit => concepto.nit.clone(),
            CampoConcepto::NombreEmisor => concepto.nombre_emisor.clone(),
            CampoConcepto::Concepto => concepto.concepto.clone(),
            CampoConcepto::NoFactura => concepto.no_factura.clone(),
            CampoConcepto::Observaciones => concepto.observaciones.clone(),
            CampoConcepto::Valor => concepto.valor.to_string(),
        }
    }

    /// Attach or clear the supporting document of the line item at
    /// `indice`. Panics on an out-of-range index.
    pub fn set_concepto_soporte(&mut self, indice: usize, soporte: Option<Adjunto>) {
        self.conceptos[indice].soporte = soporte;
    }

    /// Append an empty line item.
    pub fn add_concepto(&mut self) {
        self.conceptos.push(Concepto::default());
    }

    /// Remove the line item at `indice`, shifting the tail down one
    /// position. Immediate and unconditional; panics on an out-of-range
    /// index.
    pub fn remove_concepto(&mut self, indice: usize) {
        self.conceptos.remove(indice);
        self.recompute_saldo();
    }

    fn recompute_saldo(&mut self) {
        let total: Decimal = self.conceptos.iter().map(|c| c.valor).sum();
        self.saldo = self.dinero_entregado - total;
    }
}

/// Keep decimal digits only; anything else typed into the field is dropped
/// at entry.
fn solo_digitos(valor: &str) -> String {
    valor.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Parse a monetary input; empty or malformed input counts as zero.
fn parse_monto(valor: &str) -> Decimal {
    valor.trim().parse().unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monto(valor: &str) -> Decimal {
        valor.parse().unwrap()
    }

    #[test]
    fn saldo_sigue_al_anticipo_y_los_valores() {
        let mut s = SolicitudViatico::new();
        s.set_field(Campo::DineroEntregado, "1000");
        assert_eq!(s.saldo, monto("1000"));

        s.add_concepto();
        s.set_concepto_field(0, CampoConcepto::Valor, "150.50");
        assert_eq!(s.saldo, monto("849.50"));

        s.add_concepto();
        s.set_concepto_field(1, CampoConcepto::Valor, "49.50");
        assert_eq!(s.saldo, monto("800"));

        s.set_field(Campo::DineroEntregado, "500");
        assert_eq!(s.saldo, monto("300"));
    }

    #[test]
    fn saldo_puede_ser_negativo() {
        let mut s = SolicitudViatico::new();
        s.set_field(Campo::DineroEntregado, "100");
        s.add_concepto();
        s.set_concepto_field(0, CampoConcepto::Valor, "250");
        assert_eq!(s.saldo, monto("-150"));
    }

    #[test]
    fn valor_no_numerico_cuenta_como_cero() {
        let mut s = SolicitudViatico::new();
        s.set_field(Campo::DineroEntregado, "100");
        s.add_concepto();
        s.set_concepto_field(0, CampoConcepto::Valor, "abc");
        assert_eq!(s.conceptos[0].valor, Decimal::ZERO);
        assert_eq!(s.saldo, monto("100"));

        s.set_field(Campo::DineroEntregado, "");
        assert_eq!(s.saldo, Decimal::ZERO);
    }

    #[test]
    fn cedula_conserva_solo_digitos() {
        let mut s = SolicitudViatico::new();
        s.set_field(Campo::CedulaCiudadania, "12a-34");
        assert_eq!(s.cedula_ciudadania, "1234");
    }

    #[test]
    fn no_cuenta_conserva_solo_digitos() {
        let mut s = SolicitudViatico::new();
        s.set_field(Campo::NoCuenta, "00-11");
        assert_eq!(s.no_cuenta, "0011");
    }

    #[test]
    fn agregar_y_quitar_restaura_el_estado_previo() {
        let mut s = SolicitudViatico::new();
        s.set_field(Campo::DineroEntregado, "300");
        s.add_concepto();
        s.set_concepto_field(0, CampoConcepto::Valor, "120");
        s.set_concepto_field(0, CampoConcepto::Concepto, "Hotel");
        let previo = s.clone();

        s.add_concepto();
        s.remove_concepto(1);
        assert_eq!(s, previo);
    }

    #[test]
    fn quitar_desplaza_la_cola_una_posicion() {
        let mut s = SolicitudViatico::new();
        for n in 0..4 {
            s.add_concepto();
            s.set_concepto_field(n, CampoConcepto::Concepto, &format!("gasto {}", n));
        }

        s.remove_concepto(1);
        assert_eq!(s.conceptos.len(), 3);
        assert_eq!(s.conceptos[0].concepto, "gasto 0");
        assert_eq!(s.conceptos[1].concepto, "gasto 2");
        assert_eq!(s.conceptos[2].concepto, "gasto 3");
    }

    #[test]
    fn quitar_recalcula_el_saldo() {
        let mut s = SolicitudViatico::new();
        s.set_field(Campo::DineroEntregado, "100");
        s.add_concepto();
        s.set_concepto_field(0, CampoConcepto::Valor, "40");
        s.remove_concepto(0);
        assert_eq!(s.saldo, monto("100"));
    }

    #[test]
    #[should_panic]
    fn quitar_fuera_de_rango_entra_en_panico() {
        let mut s = SolicitudViatico::new();
        s.remove_concepto(0);
    }

    #[test]
    fn tipo_cuenta_reconoce_los_valores_del_select() {
        let mut s = SolicitudViatico::new();
        s.set_field(Campo::TipoCuenta, "ahorros");
        assert_eq!(s.tipo_cuenta, Some(TipoCuenta::Ahorros));
        s.set_field(Campo::TipoCuenta, "corriente");
        assert_eq!(s.tipo_cuenta, Some(TipoCuenta::Corriente));
        s.set_field(Campo::TipoCuenta, "");
        assert_eq!(s.tipo_cuenta, None);
    }

    #[test]
    fn soporte_se_adjunta_y_se_quita() {
        let mut s = SolicitudViatico::new();
        s.add_concepto();
        s.set_concepto_soporte(
            0,
            Some(Adjunto {
                nombre: "factura.pdf".to_string(),
                tamano: 2048,
            }),
        );
        assert_eq!(s.conceptos[0].soporte.as_ref().unwrap().nombre, "factura.pdf");

        s.set_concepto_soporte(0, None);
        assert!(s.conceptos[0].soporte.is_none());
    }
}
