// 发布版本在Windows上不弹出控制台窗口
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

fn main() {
    keystore_generator_lib::run()
}
