//! Testes do subsistema chardev
//!
//! # Como Executar os Testes
//!
//! ```bash
//! # Executar todos os testes do subsistema
//! cargo test --lib chardev::tests
//!
//! # Executar testes de um módulo específico
//! cargo test --lib chardev::tests::simple
//! cargo test --lib chardev::tests::registry
//! ```
//!
//! # Estrutura dos Testes
//!
//! - `buffer.rs` - Testes do buffer limitado
//! - `simple.rs` - Testes das operações do dispositivo
//! - `registry.rs` - Testes do registro e da classe
//! - `driver.rs` - Testes do ciclo de vida (init/teardown/unwind)
//! - `concurrency.rs` - Testes de exclusão mútua entre chamadores

#![cfg(test)]

// Módulos de teste
mod buffer;
mod concurrency;

use super::error::DevError;
use super::operations::OpenFile;
use crate::sync::CancelSignal;
use crate::uaccess::{Fault, UserBufferReader, UserBufferWriter, UserSliceReader, UserSliceWriter};

/// Helper: escreve `data` inteiro pelo handle
pub fn write_all(file: &mut OpenFile, data: &[u8]) -> Result<usize, DevError> {
    let mut reader = UserSliceReader::new(data);
    file.write(&mut reader, &CancelSignal::new())
}

/// Helper: lê até `len` bytes pelo handle
pub fn read_into(file: &mut OpenFile, len: usize) -> Result<Vec<u8>, DevError> {
    let mut out = vec![0u8; len];
    let n = {
        let mut writer = UserSliceWriter::new(&mut out);
        file.read(&mut writer, &CancelSignal::new())?
    };
    out.truncate(n);
    Ok(out)
}

/// Destino que rejeita toda cópia (simula EFAULT no read)
pub struct FaultingWriter {
    pub requested: usize,
}

impl UserBufferWriter for FaultingWriter {
    fn len(&self) -> usize {
        self.requested
    }

    fn write_slice(&mut self, _data: &[u8]) -> Result<(), Fault> {
        Err(Fault)
    }
}

/// Fonte que rejeita toda cópia (simula EFAULT no write)
pub struct FaultingReader {
    pub offered: usize,
}

impl UserBufferReader for FaultingReader {
    fn len(&self) -> usize {
        self.offered
    }

    fn read_slice(&mut self, _out: &mut [u8]) -> Result<(), Fault> {
        Err(Fault)
    }
}
