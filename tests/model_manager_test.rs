use nirupana::{BuiltinModel, ModelError, ModelManager};

#[test]
fn test_model_paths_follow_registry_name() {
    let manager = ModelManager::new("/tmp/nirupana-tests/models").unwrap();
    let info = BuiltinModel::IndicBertMalayalam.get_model_info();

    let model_path = manager.get_model_path(&info.name);
    let tokenizer_path = manager.get_tokenizer_path(&info.name);

    assert!(model_path.ends_with("indic-bert-sentiment-malayalam/model.onnx"));
    assert!(tokenizer_path.ends_with("indic-bert-sentiment-malayalam/tokenizer.json"));
}

#[test]
fn test_missing_model_reports_not_downloaded() {
    let manager = ModelManager::new("/tmp/nirupana-tests-empty/models").unwrap();
    let info = BuiltinModel::IndicBertMalayalam.get_model_info();
    let _ = manager.remove_download(&info.name);

    assert!(!manager.is_model_downloaded(&info.name));
    assert!(!manager.verify_model(&info).unwrap());
}

#[tokio::test]
#[ignore]
async fn test_model_download_and_verification() -> Result<(), ModelError> {
    let manager = ModelManager::new("/tmp/nirupana-tests-download/models")?;
    let info = BuiltinModel::IndicBertMalayalam.get_model_info();

    manager.remove_download(&info.name)?;
    assert!(!manager.is_model_downloaded(&info.name));

    manager.download_model(&info).await?;
    assert!(manager.is_model_downloaded(&info.name));
    assert!(manager.verify_model(&info)?);

    Ok(())
}

#[tokio::test]
#[ignore]
async fn test_corrupted_file_fails_verification() -> Result<(), Box<dyn std::error::Error>> {
    let manager = ModelManager::new("/tmp/nirupana-tests-corrupt/models")?;
    let info = BuiltinModel::IndicBertMalayalam.get_model_info();

    manager.ensure_model_downloaded(&info).await?;
    assert!(manager.verify_model(&info)?);

    std::fs::write(manager.get_model_path(&info.name), "corrupted data")?;
    assert!(!manager.verify_model(&info)?);

    // ensure_model_downloaded repairs the corrupted file
    manager.ensure_model_downloaded(&info).await?;
    assert!(manager.verify_model(&info)?);

    Ok(())
}
