//! ClassHub - 课堂管理平台后端服务
//!
//! 基于 Actix Web 构建的课堂管理系统后端：教师创建班级、发布资料和作业，
//! 学生通过邀请码加入班级并提交作业，教师批改后生成班级成绩报表。
//!
//! # 架构
//! - `access`: 身份解析与权限校验（核心）
//! - `cache`: 缓存层（Moka/Redis）
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `grading`: 成绩与出勤计算引擎（核心）
//! - `middlewares`: 认证授权中间件
//! - `models`: 数据模型定义
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod access;
pub mod cache;
pub mod config;
pub mod entity;
pub mod errors;
pub mod grading;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
