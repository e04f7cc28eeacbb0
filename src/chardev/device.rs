//! Device - Trait e tipos base para dispositivos

use core::fmt;

use super::error::DevError;
use super::operations::FileContext;
use crate::sync::CancelSignal;
use crate::uaccess::{UserBufferReader, UserBufferWriter};

/// Tipo de dispositivo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceType {
    /// Dispositivo de caractere (char device)
    Character,
    /// Dispositivo de bloco (block device)
    Block,
}

/// Número major/minor de dispositivo
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DeviceNumber {
    /// Major number (identifica o driver)
    pub major: u32,
    /// Minor number (identifica o dispositivo específico)
    pub minor: u32,
}

impl DeviceNumber {
    /// Cria um novo device number
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// Converte para u64 (formato Linux: major << 20 | minor)
    pub const fn as_u64(&self) -> u64 {
        ((self.major as u64) << 20) | (self.minor as u64)
    }

    /// Cria a partir de u64
    pub const fn from_u64(dev: u64) -> Self {
        Self {
            major: (dev >> 20) as u32,
            minor: (dev & 0xFFFFF) as u32,
        }
    }
}

bitflags::bitflags! {
    /// Permissões de um device node (Unix mode)
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct NodeMode: u16 {
        const OWNER_READ  = 0o400;
        const OWNER_WRITE = 0o200;
        const OWNER_EXEC  = 0o100;
        const GROUP_READ  = 0o040;
        const GROUP_WRITE = 0o020;
        const GROUP_EXEC  = 0o010;
        const OTHER_READ  = 0o004;
        const OTHER_WRITE = 0o002;
        const OTHER_EXEC  = 0o001;

        /// rw-rw-rw- (padrão para dispositivos simples)
        const RW_ALL = 0o666;
    }
}

/// Trait para dispositivos de caractere
///
/// As cinco operações que a camada de despacho (VFS) invoca por
/// operação de file descriptor. O `FileContext` é o private data
/// do handle; o `CancelSignal` é o sinal pendente do chamador.
pub trait CharDevice: Send + Sync {
    /// Retorna o nome do dispositivo
    fn name(&self) -> &str;

    /// Retorna o device number
    fn device_number(&self) -> DeviceNumber;

    /// Abre o dispositivo
    fn open(&self, _file: &mut FileContext) -> Result<(), DevError> {
        Ok(())
    }

    /// Fecha o dispositivo
    fn release(&self, _file: &mut FileContext) {}

    /// Lê do dispositivo para o buffer do chamador
    fn read(
        &self,
        _file: &mut FileContext,
        _writer: &mut dyn UserBufferWriter,
        _cancel: &CancelSignal,
    ) -> Result<usize, DevError> {
        Err(DevError::PermissionDenied)
    }

    /// Escreve do buffer do chamador para o dispositivo
    fn write(
        &self,
        _file: &mut FileContext,
        _reader: &mut dyn UserBufferReader,
        _cancel: &CancelSignal,
    ) -> Result<usize, DevError> {
        Err(DevError::PermissionDenied)
    }

    /// ioctl (controle de dispositivo)
    fn ioctl(
        &self,
        _file: &mut FileContext,
        _cmd: u32,
        _arg: u64,
        _cancel: &CancelSignal,
    ) -> Result<u64, DevError> {
        Err(DevError::InvalidCommand)
    }
}

/// Nó de dispositivo publicado em uma classe
pub struct DeviceNode {
    /// Nome do dispositivo
    pub name: &'static str,
    /// Tipo de dispositivo
    pub device_type: DeviceType,
    /// Device number
    pub dev: DeviceNumber,
    /// Permissões (Unix mode)
    pub mode: NodeMode,
    /// UID do dono
    pub uid: u32,
    /// GID do grupo
    pub gid: u32,
}

impl DeviceNode {
    /// Cria um novo device node
    pub const fn new(name: &'static str, device_type: DeviceType, dev: DeviceNumber) -> Self {
        Self {
            name,
            device_type,
            dev,
            mode: NodeMode::RW_ALL,
            uid: 0, // root
            gid: 0, // root
        }
    }

    /// Cria um device node com permissões customizadas
    pub const fn with_mode(mut self, mode: NodeMode) -> Self {
        self.mode = mode;
        self
    }
}

impl fmt::Debug for DeviceNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceNode")
            .field("name", &self.name)
            .field("type", &self.device_type)
            .field("major", &self.dev.major)
            .field("minor", &self.dev.minor)
            .field("mode", &format_args!("{:o}", self.mode.bits()))
            .finish()
    }
}
