/// Issue a command and report the device response, logging JSON to stderr
use modbus_converter::core::{Converter, InputParams, ModbusConverter};
use modbus_converter::derive::InputParams;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Default, InputParams)]
pub struct SetHumidity {
    #[modbus(key = "target", ty = "holding", cnt = 1)]
    pub target: u16,
    #[modbus(key = "fan", ty = "coil", cnt = 1)]
    pub fan: u8,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .json()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace")))
        .init();

    let converter = ModbusConverter::new();
    let feature_map = SetHumidity::feature_map().to_yaml()?;
    let params = SetHumidity {
        target: 4560,
        fan: 1,
    };

    let issued = converter.convert_issue_message(
        "humidifier-1",
        "humidifier",
        "set-humidity",
        &params.values(),
        &feature_map,
    )?;
    for message in &issued.input_messages {
        println!("issue: {message:?}");
    }

    let report = converter.convert_device_messages(&[vec![0x2d, 0x3c]], &feature_map)?;
    println!("report: {}", String::from_utf8_lossy(&report.data));

    Ok(())
}
