//! Forge Chardev.
//!
//! Driver de dispositivo de caractere de referência do Redstone OS:
//! um único buffer de bytes de capacidade fixa exposto através das
//! operações open/read/write/release/ioctl.
//!
//! O driver demonstra o ciclo de vida completo de um dispositivo
//! (alocação de identidade, publicação do node, vínculo das operações,
//! desmontagem em ordem reversa) e a disciplina de sincronização quando
//! as operações são invocadas concorrentemente por múltiplos chamadores.

#![cfg_attr(not(test), no_std)]

// Habilitar alocação dinâmica (necessário para Arc/BTreeMap)
extern crate alloc;

// --- Infraestrutura ---
pub mod logging; // Macros de log zero-overhead (kerror!, kinfo!, ...)
pub mod sync; // Primitivas de Sincronização (Mutex interrompível)
pub mod uaccess; // Fronteira de cópia kernel <-> userspace

// --- Subsistema de dispositivos de caractere ---
pub mod chardev;

// Re-exports principais
pub use chardev::driver::{DriverConfig, SimpleCharDriver};
pub use chardev::error::DevError;
pub use chardev::registry::{DeviceClass, DeviceRegistry};
