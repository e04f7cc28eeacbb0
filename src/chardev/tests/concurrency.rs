//! Testes de concorrência sobre o mesmo estado de dispositivo
//!
//! Propriedade central: o lock lineariza as operações — depois de N
//! escritas concorrentes, buffer e comprimento refletem exatamente
//! UMA das escritas por inteiro, nunca conteúdo intercalado.

use std::thread;
use std::time::Duration;

use super::{read_into, write_all};
use crate::chardev::driver::{DriverConfig, SimpleCharDriver};
use crate::chardev::error::DevError;
use crate::chardev::operations::OpenFlags;
use crate::chardev::registry::{DeviceClass, DeviceRegistry};
use crate::sync::CancelSignal;
use crate::uaccess::{Fault, UserBufferReader};

#[test]
fn test_escritores_concorrentes_sem_intercalacao() {
    const ESCRITORES: usize = 8;

    let registry = DeviceRegistry::new();
    let class = DeviceClass::new("simple_char");
    let driver = SimpleCharDriver::init(&registry, &class, DriverConfig::default()).unwrap();

    // Padrões reconhecíveis: byte distinto e comprimento distinto
    thread::scope(|s| {
        for i in 0..ESCRITORES {
            let driver = &driver;
            s.spawn(move || {
                let padrao = vec![b'A' + i as u8; 40 + i];
                let mut handle = driver.open(OpenFlags::WRONLY).unwrap();
                for _ in 0..50 {
                    assert_eq!(write_all(&mut handle, &padrao).unwrap(), padrao.len());
                }
            });
        }
    });

    // O conteúdo final é exatamente um dos padrões, por inteiro
    let mut leitor = driver.open(OpenFlags::RDONLY).unwrap();
    let conteudo = read_into(&mut leitor, 512).unwrap();

    assert!(!conteudo.is_empty());
    let byte = conteudo[0];
    assert!((b'A'..b'A' + ESCRITORES as u8).contains(&byte));
    let esperado = 40 + (byte - b'A') as usize;
    assert_eq!(conteudo.len(), esperado);
    assert!(conteudo.iter().all(|&b| b == byte));
}

#[test]
fn test_leitores_concorrentes_veem_snapshot_integro() {
    const ESCRITORES: usize = 4;
    const LEITORES: usize = 4;

    let registry = DeviceRegistry::new();
    let class = DeviceClass::new("simple_char");
    let driver = SimpleCharDriver::init(&registry, &class, DriverConfig::default()).unwrap();

    thread::scope(|s| {
        for i in 0..ESCRITORES {
            let driver = &driver;
            s.spawn(move || {
                let padrao = vec![b'a' + i as u8; 30 + i];
                let mut handle = driver.open(OpenFlags::WRONLY).unwrap();
                for _ in 0..100 {
                    write_all(&mut handle, &padrao).unwrap();
                }
            });
        }

        for _ in 0..LEITORES {
            let driver = &driver;
            s.spawn(move || {
                for _ in 0..100 {
                    // Handle novo a cada leitura: offset 0
                    let mut handle = driver.open(OpenFlags::RDONLY).unwrap();
                    let visto = read_into(&mut handle, 512).unwrap();

                    // Vazio (estado inicial) ou um padrão íntegro
                    if let Some(&byte) = visto.first() {
                        assert!(visto.iter().all(|&b| b == byte), "conteúdo intercalado");
                        assert_eq!(visto.len(), 30 + (byte - b'a') as usize);
                    }
                }
            });
        }
    });
}

/// Fonte lenta: segura o lock do dispositivo durante a cópia
struct SlowReader<'a> {
    data: &'a [u8],
    delay: Duration,
}

impl UserBufferReader for SlowReader<'_> {
    fn len(&self) -> usize {
        self.data.len()
    }

    fn read_slice(&mut self, out: &mut [u8]) -> Result<(), Fault> {
        thread::sleep(self.delay);
        out.copy_from_slice(&self.data[..out.len()]);
        Ok(())
    }
}

#[test]
fn test_espera_pelo_lock_e_cancelavel() {
    let registry = DeviceRegistry::new();
    let class = DeviceClass::new("simple_char");
    let driver = SimpleCharDriver::init(&registry, &class, DriverConfig::default()).unwrap();

    thread::scope(|s| {
        // Escritor lento segura o lock por ~150ms
        let escritor = s.spawn(|| {
            let mut handle = driver.open(OpenFlags::WRONLY).unwrap();
            let mut fonte = SlowReader {
                data: b"devagar",
                delay: Duration::from_millis(150),
            };
            handle.write(&mut fonte, &CancelSignal::new()).unwrap()
        });

        // Dá tempo do escritor entrar na seção crítica
        thread::sleep(Duration::from_millis(30));

        // Leitor com sinal já disparado: lock ocupado → abortado,
        // nenhum estado tocado
        let cancel = CancelSignal::new();
        cancel.raise();
        let mut leitor = driver.open(OpenFlags::RDONLY).unwrap();
        let mut destino = vec![0u8; 16];
        let mut writer = crate::uaccess::UserSliceWriter::new(&mut destino);
        let err = leitor.read(&mut writer, &cancel).unwrap_err();
        assert_eq!(err, DevError::Interrupted);
        assert_eq!(err.errno(), -4);
        assert_eq!(leitor.offset(), 0);

        assert_eq!(escritor.join().unwrap(), 7);
    });

    // Depois que o escritor soltou o lock, a leitura flui
    let mut leitor = driver.open(OpenFlags::RDONLY).unwrap();
    assert_eq!(read_into(&mut leitor, 32).unwrap(), b"devagar");
}
