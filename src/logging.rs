// =============================================================================
// CHARDEV LOGGING SYSTEM - ZERO OVERHEAD
// =============================================================================
//
// Sistema de logging do driver com custo ZERO em release.
//
// ARQUITETURA:
// - Usa features do Cargo para compile-time filtering
// - Com feature "no_logs", TODOS os macros viram expressões vazias
// - SEM core::fmt - Evita geração de código SSE/AVX
// - SEM alocação - Apenas strings literais e valores hex
//
// Como este crate é uma biblioteca (não fala com a serial diretamente),
// a saída vai para um sink registrado uma única vez pelo embedder via
// `logging::set_sink`. Sem sink registrado, os logs são descartados.
//
// NÍVEIS DE LOG (do mais crítico ao menos):
// - ERROR: Erros fatais ou críticos
// - WARN:  Situações suspeitas mas recuperáveis
// - INFO:  Fluxo normal de execução
// - DEBUG: Informações de debugging
// - TRACE: Detalhes extremos (cada operação)
//
// COMO USAR:
//   kinfo!("(CHARDEV) Inicializando...");      // Apenas string
//   kinfo!("(CHARDEV) Major=", major);         // String + hex
//
// =============================================================================

use spin::Once;

// =============================================================================
// PREFIXOS COM CORES ANSI
// =============================================================================

pub const P_ERROR: &str = "\x1b[1;31m[ERRO]\x1b[0m ";
pub const P_WARN: &str = "\x1b[1;33m[WARN]\x1b[0m ";
pub const P_INFO: &str = "\x1b[32m[INFO]\x1b[0m ";
pub const P_DEBUG: &str = "\x1b[36m[DEBG]\x1b[0m ";
pub const P_TRACE: &str = "\x1b[35m[TRAC]\x1b[0m ";

// =============================================================================
// SINK DE SAÍDA
// =============================================================================

/// Função de saída fornecida pelo embedder (serial, console, etc).
pub type LogSink = fn(&str);

static SINK: Once<LogSink> = Once::new();

/// Registra o sink de saída. Apenas a primeira chamada tem efeito.
pub fn set_sink(sink: LogSink) {
    SINK.call_once(|| sink);
}

/// Emite uma string literal no sink (no-op sem sink).
pub fn emit_str(s: &str) {
    if let Some(sink) = SINK.get() {
        sink(s);
    }
}

/// Emite um valor em hexadecimal (0x...), sem core::fmt.
pub fn emit_hex(val: u64) {
    const DIGITS: &[u8; 16] = b"0123456789abcdef";

    // "0x" + 16 dígitos no máximo
    let mut buf = [0u8; 18];
    buf[0] = b'0';
    buf[1] = b'x';

    if val == 0 {
        buf[2] = b'0';
        // SAFETY: apenas ASCII foi escrito no buffer
        emit_str(unsafe { core::str::from_utf8_unchecked(&buf[..3]) });
        return;
    }

    let mut v = val;
    let mut digits = [0u8; 16];
    let mut n = 0;
    while v != 0 {
        digits[n] = DIGITS[(v & 0xF) as usize];
        v >>= 4;
        n += 1;
    }

    // Dígitos foram coletados do menos significativo ao mais
    for i in 0..n {
        buf[2 + i] = digits[n - 1 - i];
    }

    // SAFETY: apenas ASCII foi escrito no buffer
    emit_str(unsafe { core::str::from_utf8_unchecked(&buf[..2 + n]) });
}

/// Emite uma quebra de linha.
pub fn emit_nl() {
    emit_str("\n");
}

// =============================================================================
// MACROS DE LOG - NÍVEL ERROR
// =============================================================================
//
// kerror! - Sempre ativo (exceto com no_logs)
// Usado para erros críticos.
//

#[cfg(not(feature = "no_logs"))]
#[macro_export]
macro_rules! kerror {
    // Apenas string literal
    ($msg:expr) => {{
        $crate::logging::emit_str($crate::logging::P_ERROR);
        $crate::logging::emit_str($msg);
        $crate::logging::emit_nl();
    }};
    // String + valor hex
    ($msg:expr, $val:expr) => {{
        $crate::logging::emit_str($crate::logging::P_ERROR);
        $crate::logging::emit_str($msg);
        $crate::logging::emit_hex($val as u64);
        $crate::logging::emit_nl();
    }};
}

#[cfg(feature = "no_logs")]
#[macro_export]
macro_rules! kerror {
    ($($t:tt)*) => {{}};
}

// =============================================================================
// MACROS DE LOG - NÍVEL WARN
// =============================================================================

#[cfg(not(feature = "no_logs"))]
#[macro_export]
macro_rules! kwarn {
    ($msg:expr) => {{
        $crate::logging::emit_str($crate::logging::P_WARN);
        $crate::logging::emit_str($msg);
        $crate::logging::emit_nl();
    }};
    ($msg:expr, $val:expr) => {{
        $crate::logging::emit_str($crate::logging::P_WARN);
        $crate::logging::emit_str($msg);
        $crate::logging::emit_hex($val as u64);
        $crate::logging::emit_nl();
    }};
}

#[cfg(feature = "no_logs")]
#[macro_export]
macro_rules! kwarn {
    ($($t:tt)*) => {{}};
}

// =============================================================================
// MACROS DE LOG - NÍVEL INFO
// =============================================================================

#[cfg(all(
    not(feature = "no_logs"),
    any(feature = "log_info", feature = "log_debug", feature = "log_trace")
))]
#[macro_export]
macro_rules! kinfo {
    ($msg:expr) => {{
        $crate::logging::emit_str($crate::logging::P_INFO);
        $crate::logging::emit_str($msg);
        $crate::logging::emit_nl();
    }};
    ($msg:expr, $val:expr) => {{
        $crate::logging::emit_str($crate::logging::P_INFO);
        $crate::logging::emit_str($msg);
        $crate::logging::emit_hex($val as u64);
        $crate::logging::emit_nl();
    }};
}

#[cfg(not(all(
    not(feature = "no_logs"),
    any(feature = "log_info", feature = "log_debug", feature = "log_trace")
)))]
#[macro_export]
macro_rules! kinfo {
    ($($t:tt)*) => {{}};
}

// =============================================================================
// MACROS DE LOG - NÍVEL DEBUG
// =============================================================================

#[cfg(all(
    not(feature = "no_logs"),
    any(feature = "log_debug", feature = "log_trace")
))]
#[macro_export]
macro_rules! kdebug {
    ($msg:expr) => {{
        $crate::logging::emit_str($crate::logging::P_DEBUG);
        $crate::logging::emit_str($msg);
        $crate::logging::emit_nl();
    }};
    ($msg:expr, $val:expr) => {{
        $crate::logging::emit_str($crate::logging::P_DEBUG);
        $crate::logging::emit_str($msg);
        $crate::logging::emit_hex($val as u64);
        $crate::logging::emit_nl();
    }};
}

#[cfg(not(all(
    not(feature = "no_logs"),
    any(feature = "log_debug", feature = "log_trace")
)))]
#[macro_export]
macro_rules! kdebug {
    ($($t:tt)*) => {{}};
}

// =============================================================================
// MACROS DE LOG - NÍVEL TRACE
// =============================================================================

#[cfg(all(not(feature = "no_logs"), feature = "log_trace"))]
#[macro_export]
macro_rules! ktrace {
    ($msg:expr) => {{
        $crate::logging::emit_str($crate::logging::P_TRACE);
        $crate::logging::emit_str($msg);
        $crate::logging::emit_nl();
    }};
    ($msg:expr, $val:expr) => {{
        $crate::logging::emit_str($crate::logging::P_TRACE);
        $crate::logging::emit_str($msg);
        $crate::logging::emit_hex($val as u64);
        $crate::logging::emit_nl();
    }};
}

#[cfg(not(all(not(feature = "no_logs"), feature = "log_trace")))]
#[macro_export]
macro_rules! ktrace {
    ($($t:tt)*) => {{}};
}

// =============================================================================
// TESTES
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_sem_sink_nao_panica() {
        // Antes de registrar sink, emitir deve ser no-op
        emit_str("descartado");
        emit_hex(0xdead);
        emit_nl();
    }
}
