//! Dispositivo de caractere com buffer único
//!
//! Um buffer de bytes de capacidade fixa compartilhado por todos os
//! handles abertos. Leituras percorrem o conteúdo válido a partir do
//! offset do handle; escritas substituem o conteúdo por inteiro.
//!
//! O lock do estado é o único ponto de serialização: duas mutações
//! de buffer/comprimento nunca se intercalam. A aquisição é
//! interrompível pelo sinal de cancelamento do chamador.

use crate::chardev::buffer::BoundedBuffer;
use crate::chardev::device::{CharDevice, DeviceNumber};
use crate::chardev::error::DevError;
use crate::chardev::operations::FileContext;
use crate::sync::{CancelSignal, Mutex};
use crate::uaccess::{UserBufferReader, UserBufferWriter};
use crate::{kinfo, ktrace};

/// Capacidade do buffer interno em bytes
pub const BUFFER_SIZE: usize = 256;

/// Comando de ioctl: zera o buffer e o comprimento válido
pub const IOCTL_CLEAR_BUFFER: u32 = 0;

/// Estado privado do dispositivo
///
/// Criado uma única vez na inicialização do driver, referenciado
/// (nunca copiado) por todos os handles, destruído na desmontagem
/// depois que a identidade foi liberada. Todo acesso ao buffer passa
/// pelo lock.
struct DeviceState {
    buffer: Mutex<BoundedBuffer<BUFFER_SIZE>>,
}

impl DeviceState {
    const fn new() -> Self {
        Self {
            buffer: Mutex::new(BoundedBuffer::new()),
        }
    }
}

/// Dispositivo de caractere com buffer único
pub struct SimpleCharDevice {
    dev: DeviceNumber,
    state: DeviceState,
}

impl SimpleCharDevice {
    /// Cria o dispositivo com buffer zerado.
    pub const fn new(dev: DeviceNumber) -> Self {
        Self {
            dev,
            state: DeviceState::new(),
        }
    }
}

impl CharDevice for SimpleCharDevice {
    fn name(&self) -> &str {
        "simple_char_dev"
    }

    fn device_number(&self) -> DeviceNumber {
        self.dev
    }

    fn open(&self, _file: &mut FileContext) -> Result<(), DevError> {
        ktrace!("(CHARDEV) Dispositivo aberto");
        Ok(())
    }

    fn release(&self, _file: &mut FileContext) {
        // Nenhuma mutação de buffer no release
        ktrace!("(CHARDEV) Dispositivo fechado");
    }

    fn read(
        &self,
        file: &mut FileContext,
        writer: &mut dyn UserBufferWriter,
        cancel: &CancelSignal,
    ) -> Result<usize, DevError> {
        let buffer = self
            .state
            .buffer
            .lock_interruptible(cancel)
            .map_err(|_| DevError::Interrupted)?;

        let offset = file.offset as usize;

        // Offset no fim (ou além) dos dados válidos: fim-de-dados,
        // não é erro
        if offset >= buffer.len() {
            return Ok(0);
        }

        let effective = core::cmp::min(writer.len(), buffer.len() - offset);

        // Se a cópia falhar, o offset fica como estava
        writer.write_slice(&buffer.bytes()[offset..offset + effective])?;

        file.offset += effective as u64;

        ktrace!("(CHARDEV) Lidos bytes=", effective);
        Ok(effective)
    }

    fn write(
        &self,
        file: &mut FileContext,
        reader: &mut dyn UserBufferReader,
        cancel: &CancelSignal,
    ) -> Result<usize, DevError> {
        let mut buffer = self
            .state
            .buffer
            .lock_interruptible(cancel)
            .map_err(|_| DevError::Interrupted)?;

        // Excesso além da capacidade é truncado em silêncio
        let clamped = core::cmp::min(reader.len(), BUFFER_SIZE - 1);

        // A cópia do chamador vai primeiro para uma área de staging;
        // o buffer só é zerado e substituído depois que a cópia toda
        // deu certo. Um fault deixa buffer e comprimento intactos.
        let mut staging = [0u8; BUFFER_SIZE];
        reader.read_slice(&mut staging[..clamped])?;

        let written = buffer.replace(&staging[..clamped]);

        // Convenção herdada: o offset do handle passa a ser o
        // comprimento escrito, não zero
        file.offset = written as u64;

        ktrace!("(CHARDEV) Escritos bytes=", written);
        Ok(written)
    }

    fn ioctl(
        &self,
        _file: &mut FileContext,
        cmd: u32,
        _arg: u64,
        cancel: &CancelSignal,
    ) -> Result<u64, DevError> {
        match cmd {
            IOCTL_CLEAR_BUFFER => {
                let mut buffer = self
                    .state
                    .buffer
                    .lock_interruptible(cancel)
                    .map_err(|_| DevError::Interrupted)?;

                buffer.clear();

                kinfo!("(CHARDEV) ioctl - buffer zerado");
                Ok(0)
            }
            // Comando desconhecido: nenhum efeito, lock nunca tomado
            _ => Err(DevError::InvalidCommand),
        }
    }
}
