use call_forecast::error::ForecastError;
use forecast_math::MathError;

#[test]
fn test_error_conversion() {
    let math_error = MathError::InsufficientData("AR(5) needs 6 observations".to_string());
    let forecast_error = ForecastError::from(math_error);

    match forecast_error {
        ForecastError::Math(_) => {}
        _ => panic!("Expected Math variant"),
    }

    let json_error = serde_json::from_str::<f64>("not json").unwrap_err();
    let forecast_error = ForecastError::from(json_error);

    assert!(matches!(forecast_error, ForecastError::Serialization(_)));
}

#[test]
fn test_error_display() {
    let error = ForecastError::InvalidParameter("Seasonal period must be at least 2".to_string());
    assert_eq!(
        error.to_string(),
        "Invalid parameter: Seasonal period must be at least 2"
    );

    let error = ForecastError::InsufficientData {
        model: "Holt-Winters".to_string(),
        needed: 8,
        got: 7,
    };
    assert_eq!(
        error.to_string(),
        "Holt-Winters needs at least 8 observations, got 7"
    );

    let error = ForecastError::from(MathError::CalculationError("diverged".to_string()));
    assert!(error.to_string().contains("diverged"));
}
