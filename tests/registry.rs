mod tests {
    use hap_light_strip::{
        AccessError, AccessoryConfig, Category, CharacteristicId, Format, HapType, Permissions,
        Range, Registry, SetupCodeError, TargetState, TopologyError, Value, WriteHandler,
    };

    fn noop() {}

    #[test]
    fn test_topology_layout() {
        let bridge = TargetState::new();
        let registry = Registry::build(&AccessoryConfig::DEFAULT, &bridge, &noop);
        let accessory = registry.accessory();

        assert_eq!(accessory.id(), 1);
        assert_eq!(accessory.category(), Category::Lightbulb);
        assert_eq!(accessory.category().code(), 5);

        let services = accessory.services();
        assert_eq!(services.len(), 2);
        assert_eq!(services[0].hap_type(), HapType::ACCESSORY_INFORMATION);
        assert!(!services[0].is_primary());
        assert_eq!(
            services[0].characteristics(),
            &[
                CharacteristicId::AccessoryName,
                CharacteristicId::Manufacturer,
                CharacteristicId::SerialNumber,
                CharacteristicId::Model,
                CharacteristicId::FirmwareRevision,
                CharacteristicId::Identify,
            ]
        );
        assert_eq!(services[1].hap_type(), HapType::LIGHTBULB);
        assert!(services[1].is_primary());
        assert_eq!(
            services[1].characteristics(),
            &[
                CharacteristicId::On,
                CharacteristicId::Brightness,
                CharacteristicId::Hue,
                CharacteristicId::Saturation,
                CharacteristicId::LightName,
            ]
        );
        assert_eq!(
            accessory.primary_service().map(|service| service.hap_type()),
            Some(HapType::LIGHTBULB)
        );
    }

    #[test]
    fn test_instance_ids_are_sequential() {
        let bridge = TargetState::new();
        let registry = Registry::build(&AccessoryConfig::DEFAULT, &bridge, &noop);
        let services = registry.accessory().services();

        assert_eq!(services[0].instance_id(), 1);
        assert_eq!(registry.get(CharacteristicId::AccessoryName).instance_id(), 2);
        assert_eq!(registry.get(CharacteristicId::Identify).instance_id(), 7);
        assert_eq!(services[1].instance_id(), 8);
        assert_eq!(registry.get(CharacteristicId::On).instance_id(), 9);
        assert_eq!(registry.get(CharacteristicId::LightName).instance_id(), 13);

        assert_eq!(registry.lookup(10), Some(CharacteristicId::Brightness));
        assert_eq!(registry.lookup(1), None);
        assert_eq!(registry.lookup(99), None);
        for id in CharacteristicId::ALL {
            assert_eq!(registry.lookup(registry.get(id).instance_id()), Some(id));
        }
    }

    #[test]
    fn test_characteristic_metadata() {
        let bridge = TargetState::new();
        let registry = Registry::build(&AccessoryConfig::DEFAULT, &bridge, &noop);

        let brightness = registry.get(CharacteristicId::Brightness);
        assert_eq!(brightness.hap_type(), HapType::BRIGHTNESS);
        assert_eq!(brightness.description(), "Brightness");
        assert_eq!(brightness.format(), Format::Int);
        assert_eq!(brightness.range(), Some(Range::new(0.0, 100.0, 1.0)));
        assert_eq!(
            brightness.permissions(),
            Permissions::PAIRED_READ | Permissions::PAIRED_WRITE | Permissions::NOTIFY
        );

        let hue = registry.get(CharacteristicId::Hue);
        assert_eq!(hue.format(), Format::Float);
        assert_eq!(hue.range(), Some(Range::new(0.0, 360.0, 1.0)));

        let manufacturer = registry.get(CharacteristicId::Manufacturer);
        assert_eq!(manufacturer.permissions(), Permissions::PAIRED_READ);
        assert_eq!(manufacturer.handler(), None);
        assert_eq!(manufacturer.range(), None);

        let identify = registry.get(CharacteristicId::Identify);
        assert_eq!(identify.permissions(), Permissions::PAIRED_WRITE);
        assert_eq!(identify.handler(), Some(WriteHandler::Identify));
    }

    #[test]
    fn test_identity_strings_from_config() {
        let bridge = TargetState::new();
        let registry = Registry::build(&AccessoryConfig::DEFAULT, &bridge, &noop);

        let expected = [
            (CharacteristicId::AccessoryName, "RGB"),
            (CharacteristicId::Manufacturer, "RGB"),
            (CharacteristicId::SerialNumber, "HKLED-001"),
            (CharacteristicId::Model, "WS2812"),
            (CharacteristicId::FirmwareRevision, "1.0.0"),
            (CharacteristicId::LightName, "HomeKit LED Strip"),
        ];
        for (id, text) in expected {
            assert_eq!(registry.read(id), Ok(Value::String(text)));
        }
        assert_eq!(registry.setup_code().as_str(), "111-22-333");
    }

    #[test]
    fn test_read_only_write_is_rejected() {
        let bridge = TargetState::new();
        let registry = Registry::build(&AccessoryConfig::DEFAULT, &bridge, &noop);

        for id in [
            CharacteristicId::AccessoryName,
            CharacteristicId::Manufacturer,
            CharacteristicId::SerialNumber,
            CharacteristicId::Model,
            CharacteristicId::FirmwareRevision,
            CharacteristicId::LightName,
        ] {
            let before = registry.read(id);
            assert_eq!(
                registry.write(id, Value::String("tampered")),
                Err(AccessError::ReadOnly)
            );
            assert_eq!(registry.read(id), before);
        }
        assert_eq!(bridge.snapshot(), Default::default());
    }

    #[test]
    fn test_identify_is_write_only() {
        let bridge = TargetState::new();
        let registry = Registry::build(&AccessoryConfig::DEFAULT, &bridge, &noop);

        assert_eq!(
            registry.read(CharacteristicId::Identify),
            Err(AccessError::WriteOnly)
        );
    }

    #[test]
    fn test_cache_seeded_from_bridge() {
        let bridge = TargetState::new();
        let registry = Registry::build(&AccessoryConfig::DEFAULT, &bridge, &noop);

        assert_eq!(registry.read(CharacteristicId::On), Ok(Value::Bool(false)));
        assert_eq!(
            registry.read(CharacteristicId::Brightness),
            Ok(Value::Int(100))
        );
        assert_eq!(registry.read(CharacteristicId::Hue), Ok(Value::Float(0.0)));
        assert_eq!(
            registry.read(CharacteristicId::Saturation),
            Ok(Value::Float(0.0))
        );
    }

    #[test]
    fn test_service_characteristics_follow_service_order() {
        let bridge = TargetState::new();
        let registry = Registry::build(&AccessoryConfig::DEFAULT, &bridge, &noop);
        let lightbulb = &registry.accessory().services()[1];

        let descriptions: Vec<&str> = registry
            .service_characteristics(lightbulb)
            .map(|characteristic| characteristic.description())
            .collect();
        assert_eq!(descriptions, ["On", "Brightness", "Hue", "Saturation", "Name"]);
    }

    #[test]
    fn test_malformed_config_is_reported() {
        let bridge = TargetState::new();

        let config = AccessoryConfig::DEFAULT.with_model("");
        assert_eq!(
            Registry::try_build(&config, &bridge, &noop).err(),
            Some(TopologyError::EmptyIdentity(CharacteristicId::Model))
        );

        let long_name = "an accessory name that is far longer than sixty four bytes allows";
        let config = AccessoryConfig::DEFAULT.with_light_name(long_name);
        assert_eq!(
            Registry::try_build(&config, &bridge, &noop).err(),
            Some(TopologyError::StringTooLong {
                id: CharacteristicId::LightName,
                len: long_name.len(),
                max: 64,
            })
        );

        let config = AccessoryConfig::DEFAULT.with_setup_code("123-45-678");
        assert_eq!(
            Registry::try_build(&config, &bridge, &noop).err(),
            Some(TopologyError::SetupCode(SetupCodeError::Trivial))
        );
    }

    #[test]
    #[should_panic(expected = "malformed accessory topology")]
    fn test_build_panics_on_malformed_config() {
        let bridge = TargetState::new();
        let config = AccessoryConfig::DEFAULT.with_serial_number("");
        let _registry = Registry::build(&config, &bridge, &noop);
    }
}
