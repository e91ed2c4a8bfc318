// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 工具模块
///
/// 提供通用的工具函数和辅助功能
/// 包括回调签名校验、URL校验、日志初始化等功能
pub mod signature;
pub mod telemetry;
pub mod validators;
