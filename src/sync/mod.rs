//! # Synchronization Primitives
//!
//! Primitivas de sincronização usadas pelo driver.
//!
//! ## Hierarquia de Uso
//!
//! ```text
//! Mutex            → Seção crítica do buffer (pode bloquear)
//! CancelSignal     → Cancelamento externo da espera pelo lock
//! ```
//!
//! ## Regras
//!
//! - O lock do dispositivo é o ÚNICO ponto de serialização do driver
//! - Aquisições bloqueantes devem usar `lock_interruptible` quando o
//!   chamador puder receber um sinal de cancelamento

/// Mutex (pode bloquear thread, aquisição interrompível)
pub mod mutex;


// Re-exports
pub use mutex::{CancelSignal, Interrupted, Mutex, MutexGuard};
