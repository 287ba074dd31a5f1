// [libs/shared/telemetry/src/lib.rs]
/*!
 * =================================================================
 * APARATO: TELEMETRY STRATUM ROOT
 * CLASIFICACION: SHARED UTILITY (ESTRATO L4)
 * RESPONSABILIDAD: INICIALIZACION DE TRAZADO Y CAPTURA DE PANICOS
 *
 * Modo desarrollo emite lineas compactas legibles en terminal; modo
 * release emite JSON plano apto para ingesta en un agregador externo.
 * Un hook de panico global asegura que un colapso en cualquier hilo
 * de la cuadrilla de Rayon quede registrado antes de que el proceso
 * termine.
 * =================================================================
 */
#![deny(missing_docs)]

use std::panic;
use tracing::error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Inicializa el suscriptor global de trazas para `service_name` y
/// registra un hook de panico que deja constancia del hilo colapsado.
///
/// El filtro de nivel respeta `RUST_LOG` si esta definida; en su
/// ausencia usa `debug` en compilaciones de depuracion y `info` en
/// release, con el ruido de las dependencias silenciado por defecto.
///
/// # Panics
/// Entra en panico si ya existe un suscriptor global instalado en el
/// proceso (solo debe llamarse una vez, al arrancar el binario).
pub fn init_tracing(service_name: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if cfg!(debug_assertions) { "debug" } else { "info" };
        format!("{service_name}={level},rayon_core=warn").into()
    });

    if cfg!(debug_assertions) {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().compact().with_target(false))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().flatten_event(true))
            .init();
    }

    let service = service_name.to_string();
    panic::set_hook(Box::new(move |info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
            .unwrap_or_else(|| "unknown".to_string());

        let message = info
            .payload()
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| info.payload().downcast_ref::<String>().map(String::as_str))
            .unwrap_or("non-string panic payload");

        error!(target: "panic", service = %service, location = %location, "worker thread panicked: {message}");
    }));
}
