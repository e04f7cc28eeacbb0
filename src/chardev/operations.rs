//! Operações sobre handles de dispositivos abertos

use alloc::sync::Arc;

use super::device::CharDevice;
use super::error::DevError;
use crate::sync::CancelSignal;
use crate::uaccess::{UserBufferReader, UserBufferWriter};

/// Flags para abertura de dispositivos
///
/// O modo de acesso POSIX é um campo de 2 bits (não bits
/// independentes), por isso a representação manual.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenFlags {
    bits: u32,
}

impl OpenFlags {
    /// Apenas leitura
    pub const RDONLY: Self = Self { bits: 0o0 };
    /// Apenas escrita
    pub const WRONLY: Self = Self { bits: 0o1 };
    /// Leitura e escrita
    pub const RDWR: Self = Self { bits: 0o2 };

    /// Cria flags a partir de bits
    pub const fn from_bits(bits: u32) -> Self {
        Self { bits }
    }

    /// Retorna os bits
    pub const fn bits(&self) -> u32 {
        self.bits
    }

    /// Verifica se tem flag de leitura
    pub const fn can_read(&self) -> bool {
        (self.bits & 0o3) == 0o0 || (self.bits & 0o3) == 0o2
    }

    /// Verifica se tem flag de escrita
    pub const fn can_write(&self) -> bool {
        (self.bits & 0o3) == 0o1 || (self.bits & 0o3) == 0o2
    }
}

/// Private data de um handle aberto
///
/// Cada open() cria um contexto próprio; o estado do dispositivo em
/// si é único e compartilhado por todos os handles.
#[derive(Debug)]
pub struct FileContext {
    /// Posição atual do handle
    pub offset: u64,
    /// Flags de abertura
    pub flags: OpenFlags,
}

impl FileContext {
    pub const fn new(flags: OpenFlags) -> Self {
        Self { offset: 0, flags }
    }
}

/// Handle aberto de um dispositivo de caractere
///
/// Máquina de estados do handle: Closed → Open → Closed. `open` no
/// registro cria o handle (Open); `release` (ou drop) o fecha de
/// volta. O handle referencia o único estado do dispositivo, nunca
/// o copia.
pub struct OpenFile {
    device: Arc<dyn CharDevice>,
    ctx: FileContext,
}

impl core::fmt::Debug for OpenFile {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("OpenFile").field("ctx", &self.ctx).finish()
    }
}

impl OpenFile {
    pub(super) fn new(device: Arc<dyn CharDevice>, ctx: FileContext) -> Self {
        Self { device, ctx }
    }

    /// Posição atual do handle.
    pub fn offset(&self) -> u64 {
        self.ctx.offset
    }

    /// Lê do dispositivo para o buffer do chamador.
    pub fn read(
        &mut self,
        writer: &mut dyn UserBufferWriter,
        cancel: &CancelSignal,
    ) -> Result<usize, DevError> {
        if !self.ctx.flags.can_read() {
            return Err(DevError::PermissionDenied);
        }
        self.device.read(&mut self.ctx, writer, cancel)
    }

    /// Escreve do buffer do chamador para o dispositivo.
    pub fn write(
        &mut self,
        reader: &mut dyn UserBufferReader,
        cancel: &CancelSignal,
    ) -> Result<usize, DevError> {
        if !self.ctx.flags.can_write() {
            return Err(DevError::PermissionDenied);
        }
        self.device.write(&mut self.ctx, reader, cancel)
    }

    /// Comando de controle do dispositivo.
    pub fn ioctl(&mut self, cmd: u32, arg: u64, cancel: &CancelSignal) -> Result<u64, DevError> {
        self.device.ioctl(&mut self.ctx, cmd, arg, cancel)
    }

    /// Fecha o handle explicitamente (equivalente a drop).
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for OpenFile {
    fn drop(&mut self) {
        self.device.release(&mut self.ctx);
    }
}
