//! Ciclo de vida do driver
//!
//! O driver é um objeto de contexto construído explicitamente:
//! `init` adquire os recursos na ordem identidade → vínculo → node,
//! e qualquer falha desfaz o que já foi adquirido em ordem reversa.
//! O `Drop` desmonta tudo na mesma ordem reversa, depois do que
//! nenhuma operação pode mais ser despachada.

use alloc::sync::Arc;

use super::device::{DeviceNode, DeviceNumber, DeviceType};
use super::devices::simple::SimpleCharDevice;
use super::error::DevError;
use super::operations::{OpenFile, OpenFlags};
use super::registry::{DeviceClass, DeviceRegistry};
use crate::{kerror, kinfo};

/// Configuração externa do driver
#[derive(Debug, Clone, Copy)]
pub struct DriverConfig {
    /// Major da identidade; 0 = alocação dinâmica
    pub major: u32,
    /// Nome do node publicado
    pub device_name: &'static str,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            major: 0,
            device_name: "simple_char_dev",
        }
    }
}

/// Driver do dispositivo de caractere com buffer único
///
/// Possui o único `SimpleCharDevice` da vida do módulo e referencia
/// os colaboradores do host (registro e classe). Existe exatamente
/// um estado de dispositivo por identidade registrada.
pub struct SimpleCharDriver<'a> {
    registry: &'a DeviceRegistry,
    class: &'a DeviceClass,
    dev: DeviceNumber,
    device: Arc<SimpleCharDevice>,
}

impl core::fmt::Debug for SimpleCharDriver<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SimpleCharDriver")
            .field("dev", &self.dev)
            .finish()
    }
}

impl<'a> SimpleCharDriver<'a> {
    /// Inicializa o driver: identidade, vínculo das operações e node.
    ///
    /// Falha em qualquer passo desfaz os anteriores em ordem reversa
    /// e devolve o erro ao chamador.
    pub fn init(
        registry: &'a DeviceRegistry,
        class: &'a DeviceClass,
        config: DriverConfig,
    ) -> Result<Self, DevError> {
        kinfo!("(CHARDEV) Inicializando driver...");

        // 1. Identidade numérica (major/minor)
        let dev = registry.register_region(config.major, config.device_name)?;

        // 2. Vínculo das operações (estado único do dispositivo)
        let device = Arc::new(SimpleCharDevice::new(dev));
        if let Err(e) = registry.bind(dev, device.clone()) {
            kerror!("(CHARDEV) Falha no vínculo das operações");
            registry.unregister_region(dev);
            return Err(e);
        }

        // 3. Node visível ao usuário
        let node = DeviceNode::new(config.device_name, DeviceType::Character, dev);
        if let Err(e) = class.create_node(node) {
            kerror!("(CHARDEV) Falha ao publicar node");
            registry.unbind(dev);
            registry.unregister_region(dev);
            return Err(e);
        }

        kinfo!("(CHARDEV) Driver pronto, major=", dev.major);
        Ok(Self {
            registry,
            class,
            dev,
            device,
        })
    }

    /// Identidade registrada do dispositivo.
    pub fn device_number(&self) -> DeviceNumber {
        self.dev
    }

    /// O único dispositivo do driver.
    pub fn device(&self) -> &SimpleCharDevice {
        &self.device
    }

    /// Abre um handle através da camada de despacho.
    pub fn open(&self, flags: OpenFlags) -> Result<OpenFile, DevError> {
        self.registry.open(self.dev, flags)
    }
}

impl Drop for SimpleCharDriver<'_> {
    fn drop(&mut self) {
        // Ordem reversa da aquisição
        self.class.destroy_node(self.dev);
        self.registry.unbind(self.dev);
        self.registry.unregister_region(self.dev);

        kinfo!("(CHARDEV) Driver desmontado");
    }
}
