//! 選択メディアのプレビュー参照

use wasm_bindgen::JsValue;
use web_sys::{File, Url};

/// 選択ファイルへの失効可能なローカル参照（Object URL）
///
/// Dropで必ずrevokeされる。解放は後継ハンドルの設置後にのみ起こるよう、
/// 保持側は新しい値を入れてから古い値を落とすこと。
#[derive(Debug)]
pub struct PreviewHandle {
    url: String,
}

impl PreviewHandle {
    pub fn new(file: &File) -> Result<Self, JsValue> {
        let url = Url::create_object_url_with_blob(file)?;
        Ok(Self { url })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        let _ = Url::revoke_object_url(&self.url);
    }
}

/// ファイル選択1回分: 送信に使うFileとプレビュー参照の組
#[derive(Debug)]
pub struct SelectedMedia {
    pub file: File,
    pub preview: PreviewHandle,
}

impl SelectedMedia {
    pub fn new(file: File) -> Result<Self, JsValue> {
        let preview = PreviewHandle::new(&file)?;
        Ok(Self { file, preview })
    }
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn dummy_file(name: &str) -> File {
        let parts = js_sys::Array::of1(&JsValue::from_str("dummy bytes"));
        File::new_with_str_sequence(&parts, name).expect("File作成に失敗")
    }

    #[wasm_bindgen_test]
    fn wasm_preview_handle_creates_blob_url() {
        let file = dummy_file("plate.png");
        let handle = PreviewHandle::new(&file).expect("ハンドル作成に失敗");
        assert!(handle.url().starts_with("blob:"));
    }

    #[wasm_bindgen_test]
    fn wasm_superseding_handle_outlives_released_one() {
        let file = dummy_file("plate.png");
        let old = PreviewHandle::new(&file).expect("ハンドル作成に失敗");
        let old_url = old.url().to_string();

        // 新しいハンドルを設置してから旧ハンドルを解放する順序
        let new = PreviewHandle::new(&file).expect("ハンドル作成に失敗");
        drop(old);

        assert_ne!(new.url(), old_url);
        assert!(new.url().starts_with("blob:"));
    }

    #[wasm_bindgen_test]
    fn wasm_selected_media_keeps_file_and_preview() {
        let media = SelectedMedia::new(dummy_file("drive.mp4")).expect("選択の作成に失敗");
        assert_eq!(media.file.name(), "drive.mp4");
        assert!(media.preview.url().starts_with("blob:"));
    }
}
