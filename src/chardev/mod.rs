//! Chardev - Subsistema de dispositivos de caractere
//!
//! Driver de referência: um buffer único de capacidade fixa exposto
//! via open/read/write/release/ioctl.
//!
//! # Arquitetura
//!
//! ```text
//! despacho externo → handler (lock) → estado do dispositivo → (unlock) → status
//! ```
//!
//! - O estado do dispositivo é único para a vida do módulo e
//!   compartilhado por todos os handles (sem isolamento por handle).
//! - O lock do estado lineariza as operações; a aquisição bloqueante
//!   é cancelável pelo sinal do chamador.
//! - Erros de handler voltam como status; só falha de inicialização
//!   desmonta recursos.
//!
//! # Módulos
//!
//! - `device` - Trait CharDevice e tipos base (números, nodes)
//! - `buffer` - Buffer limitado com comprimento válido explícito
//! - `operations` - Handles abertos (OpenFile, flags, contexto)
//! - `registry` - Registro de identidades e publicação de nodes
//! - `driver` - Ciclo de vida (init com unwind, teardown reverso)
//! - `devices/*` - Implementações específicas

pub mod buffer;
pub mod device;
pub mod devices;
pub mod driver;
pub mod error;
pub mod operations;
pub mod registry;

#[cfg(test)]
mod tests;

// Re-exports públicos
pub use device::{CharDevice, DeviceNode, DeviceNumber, DeviceType, NodeMode};
pub use devices::{SimpleCharDevice, BUFFER_SIZE, IOCTL_CLEAR_BUFFER};
pub use error::DevError;
pub use operations::{FileContext, OpenFile, OpenFlags};
pub use registry::{DeviceClass, DeviceRegistry};
